use eyre::Result;
use studio_core::{errors::StudioResult, models::schedule::LessonSlot};

use crate::{keys::CollectionKey, store::Store};

pub async fn get_schedule(store: &Store) -> Result<Vec<LessonSlot>> {
    store.get(CollectionKey::Schedule).await
}

pub async fn set_schedule(store: &Store, slots: &[LessonSlot]) -> Result<()> {
    store.set(CollectionKey::Schedule, &slots).await
}

pub async fn update_schedule<R, F>(store: &Store, f: F) -> StudioResult<R>
where
    F: FnOnce(&mut Vec<LessonSlot>) -> StudioResult<R>,
{
    store.update(CollectionKey::Schedule, f).await
}
