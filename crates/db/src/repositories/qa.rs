use eyre::Result;
use studio_core::{errors::StudioResult, models::qa::QaItem};

use crate::{keys::CollectionKey, store::Store};

pub async fn get_qa(store: &Store) -> Result<Vec<QaItem>> {
    store.get(CollectionKey::Qa).await
}

pub async fn update_qa<R, F>(store: &Store, f: F) -> StudioResult<R>
where
    F: FnOnce(&mut Vec<QaItem>) -> StudioResult<R>,
{
    store.update(CollectionKey::Qa, f).await
}
