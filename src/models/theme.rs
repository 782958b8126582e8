use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND_IMAGE: &str =
    "https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=1920&q=80";

/// Visual theme the model proposes for a destination.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemePalette {
    pub search_query: String,
    pub primary_color: String,
    pub accent_color: String,
    pub gradient: String,
    #[serde(default)]
    pub emojis: Vec<String>,
    #[serde(default)]
    pub vibe: String,
    #[serde(default)]
    pub particle_color: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationTheme {
    #[serde(flatten)]
    pub palette: ThemePalette,
    pub background_image: String,
    pub destination: String,
}

impl DestinationTheme {
    /// Served when theme generation fails outright.
    pub fn world() -> Self {
        Self {
            palette: ThemePalette {
                search_query: "world travel".to_string(),
                primary_color: "#6366f1".to_string(),
                accent_color: "#a855f7".to_string(),
                gradient: "from-indigo-600 via-purple-600 to-pink-600".to_string(),
                emojis: vec!["🌍".to_string(), "✈️".to_string()],
                vibe: "adventure exploration discovery".to_string(),
                particle_color: "#6366f1".to_string(),
            },
            background_image: DEFAULT_BACKGROUND_IMAGE.to_string(),
            destination: "World".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeRequest {
    pub destination: String,
}
