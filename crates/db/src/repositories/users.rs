use eyre::Result;
use studio_core::{access, errors::StudioResult, models::user::User};
use uuid::Uuid;

use crate::{keys::CollectionKey, store::Store};

pub async fn get_users(store: &Store) -> Result<Vec<User>> {
    store.get(CollectionKey::Users).await
}

pub async fn update_users<R, F>(store: &Store, f: F) -> StudioResult<R>
where
    F: FnOnce(&mut Vec<User>) -> StudioResult<R>,
{
    store.update(CollectionKey::Users, f).await
}

pub async fn get_user_by_id(store: &Store, id: Uuid) -> Result<Option<User>> {
    let users = get_users(store).await?;
    Ok(users.into_iter().find(|u| u.id == id))
}

pub async fn get_user_by_email(store: &Store, email: &str) -> Result<Option<User>> {
    let users = get_users(store).await?;
    Ok(access::find_by_email(&users, email).cloned())
}
