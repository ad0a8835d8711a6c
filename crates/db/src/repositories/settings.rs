use eyre::Result;
use studio_core::models::settings::{AppSettings, Theme};

use crate::{keys::CollectionKey, store::Store};

pub async fn get_settings(store: &Store) -> Result<AppSettings> {
    store.get(CollectionKey::Settings).await
}

pub async fn set_settings(store: &Store, settings: &AppSettings) -> Result<()> {
    store.set(CollectionKey::Settings, settings).await
}

pub async fn get_theme(store: &Store) -> Result<Theme> {
    store.get(CollectionKey::Theme).await
}

pub async fn set_theme(store: &Store, theme: Theme) -> Result<()> {
    store.set(CollectionKey::Theme, &theme).await
}

pub async fn get_hide_credentials_hint(store: &Store) -> Result<bool> {
    store.get(CollectionKey::HideCredentialsHint).await
}

pub async fn set_hide_credentials_hint(store: &Store, hide: bool) -> Result<()> {
    store.set(CollectionKey::HideCredentialsHint, &hide).await
}
