use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Font {
    #[default]
    Sans,
    Serif,
    Mono,
    Rounded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub max_upload_size_mb: u32,
    pub logo_url: Option<String>,
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub font: Font,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            max_upload_size_mb: 10,
            logo_url: None,
            main_image_url: Some(
                "https://images.unsplash.com/photo-1544367563-12123d895e29?auto=format&fit=crop&w=1950&q=80"
                    .to_string(),
            ),
            font: Font::Sans,
        }
    }
}

/// Named colour palettes the teacher can pick from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Theme {
    #[default]
    PinkBlue,
    SageSand,
    LavenderTeal,
    EarthSky,
    RoyalGold,
    ForestStone,
    FireIce,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::PinkBlue,
        Theme::SageSand,
        Theme::LavenderTeal,
        Theme::EarthSky,
        Theme::RoyalGold,
        Theme::ForestStone,
        Theme::FireIce,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::PinkBlue => "Pink & Blue",
            Theme::SageSand => "Sage & Sand",
            Theme::LavenderTeal => "Lavender & Teal",
            Theme::EarthSky => "Earth & Sky",
            Theme::RoyalGold => "Royal & Gold",
            Theme::ForestStone => "Forest & Stone",
            Theme::FireIce => "Fire & Ice",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub name: String,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            name: theme.display_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintResponse {
    pub show_hint: bool,
}
