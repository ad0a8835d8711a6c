use serde::{Deserialize, Serialize};

/// The named collections the studio persists. Each one is stored and
/// replaced as a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKey {
    Users,
    Content,
    Schedule,
    Qa,
    Settings,
    Theme,
    HideCredentialsHint,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 7] = [
        CollectionKey::Users,
        CollectionKey::Content,
        CollectionKey::Schedule,
        CollectionKey::Qa,
        CollectionKey::Settings,
        CollectionKey::Theme,
        CollectionKey::HideCredentialsHint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Users => "studio_users",
            CollectionKey::Content => "studio_content",
            CollectionKey::Schedule => "studio_schedule",
            CollectionKey::Qa => "studio_qa",
            CollectionKey::Settings => "studio_settings",
            CollectionKey::Theme => "studio_theme",
            CollectionKey::HideCredentialsHint => "studio_hide_creds_hint",
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
