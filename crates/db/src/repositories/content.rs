use eyre::Result;
use studio_core::{
    errors::StudioResult,
    models::content::{sort_feed, ContentItem},
};

use crate::{keys::CollectionKey, store::Store};

/// The feed, newest first.
pub async fn get_content(store: &Store) -> Result<Vec<ContentItem>> {
    let mut items: Vec<ContentItem> = store.get(CollectionKey::Content).await?;
    sort_feed(&mut items);
    Ok(items)
}

pub async fn update_content<R, F>(store: &Store, f: F) -> StudioResult<R>
where
    F: FnOnce(&mut Vec<ContentItem>) -> StudioResult<R>,
{
    store.update(CollectionKey::Content, f).await
}
