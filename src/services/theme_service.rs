//! Destination theming: a model-proposed palette plus a background photo.
//!
//! Photos come from Pexels, then Unsplash, then a curated table keyed by
//! destination name. Any failure in palette generation serves the generic
//! "World" theme instead.

use reqwest::Client;
use serde::Deserialize;
use std::{fmt, sync::Arc, time::Duration};
use url::Url;

use crate::config::PhotoConfig;
use crate::models::theme::{DestinationTheme, ThemePalette, DEFAULT_BACKGROUND_IMAGE};
use crate::services::json_recovery::{parse_llm_json, JsonRecoveryError};
use crate::services::llm::retry::{complete_with_retry, RetryPolicy};
use crate::services::llm::{CompletionRequest, LlmClient, LlmError};

const THEME_MAX_TOKENS: u32 = 500;
const THEME_TEMPERATURE: f32 = 0.7;
const PHOTO_TIMEOUT_SECS: u64 = 10;

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const UNSPLASH_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Curated landscape shots, matched by substring in either direction.
const FALLBACK_IMAGES: [(&str, &str); 20] = [
    ("karnataka", "https://images.unsplash.com/photo-1588408708726-d3cd2d6e8ab8?w=1920&q=80"),
    ("bangalore", "https://images.unsplash.com/photo-1596176530529-78163a4f7af2?w=1920&q=80"),
    ("mysore", "https://images.unsplash.com/photo-1588408708726-d3cd2d6e8ab8?w=1920&q=80"),
    ("hampi", "https://images.unsplash.com/photo-1609920658906-8223bd289001?w=1920&q=80"),
    ("coorg", "https://images.unsplash.com/photo-1596895111956-bf1cf0599ce5?w=1920&q=80"),
    ("tokyo", "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=1920&q=80"),
    ("paris", "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=1920&q=80"),
    ("bali", "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=1920&q=80"),
    ("dubai", "https://images.unsplash.com/photo-1512453979798-5ea266f8880c?w=1920&q=80"),
    ("london", "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad?w=1920&q=80"),
    ("newyork", "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=1920&q=80"),
    ("maldives", "https://images.unsplash.com/photo-1514282401047-d79a71a590e8?w=1920&q=80"),
    ("santorini", "https://images.unsplash.com/photo-1613395877344-13d4a8e0d49e?w=1920&q=80"),
    ("kerala", "https://images.unsplash.com/photo-1602216056096-3b40cc0c9944?w=1920&q=80"),
    ("goa", "https://images.unsplash.com/photo-1512343879784-a960bf40e7f2?w=1920&q=80"),
    ("rajasthan", "https://images.unsplash.com/photo-1477587458883-47145ed94245?w=1920&q=80"),
    ("jaipur", "https://images.unsplash.com/photo-1477587458883-47145ed94245?w=1920&q=80"),
    ("agra", "https://images.unsplash.com/photo-1564507592333-c60657eea523?w=1920&q=80"),
    ("delhi", "https://images.unsplash.com/photo-1587474260584-136574528ed5?w=1920&q=80"),
    ("mumbai", "https://images.unsplash.com/photo-1570168007204-dfb528c6958f?w=1920&q=80"),
];

#[derive(Debug)]
pub enum ThemeError {
    Llm(LlmError),
    Parse(JsonRecoveryError),
    Shape(String),
    Photo(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::Llm(e) => write!(f, "Theme generation failed: {}", e),
            ThemeError::Parse(e) => write!(f, "Failed to parse theme: {}", e),
            ThemeError::Shape(e) => write!(f, "Theme JSON has the wrong shape: {}", e),
            ThemeError::Photo(e) => write!(f, "Photo search failed: {}", e),
        }
    }
}

impl std::error::Error for ThemeError {}

impl From<LlmError> for ThemeError {
    fn from(err: LlmError) -> Self {
        ThemeError::Llm(err)
    }
}

impl From<JsonRecoveryError> for ThemeError {
    fn from(err: JsonRecoveryError) -> Self {
        ThemeError::Parse(err)
    }
}

impl From<reqwest::Error> for ThemeError {
    fn from(err: reqwest::Error) -> Self {
        ThemeError::Photo(err.to_string())
    }
}

/// Picks a curated image for a destination, or the generic travel shot.
pub fn fallback_image(destination: &str) -> &'static str {
    let normalized: String = destination.trim().to_lowercase();
    if normalized.is_empty() {
        return DEFAULT_BACKGROUND_IMAGE;
    }
    let compact: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();

    FALLBACK_IMAGES
        .iter()
        .find(|(key, _)| {
            normalized.contains(key) || compact.contains(key) || key.contains(normalized.as_str())
        })
        .map_or(DEFAULT_BACKGROUND_IMAGE, |(_, url)| *url)
}

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    src: PexelsSource,
}

#[derive(Debug, Deserialize)]
struct PexelsSource {
    large2x: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

/// Stock photo lookup. Providers without a key are skipped.
#[derive(Clone)]
pub struct PhotoSearch {
    http_client: Client,
    pexels_api_key: Option<String>,
    unsplash_access_key: Option<String>,
}

impl PhotoSearch {
    pub fn new(config: &PhotoConfig) -> Result<Self, ThemeError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(PHOTO_TIMEOUT_SECS))
            .build()
            .map_err(|e| ThemeError::Photo(format!("Failed to build HTTP client: {}", e)))?;

        if config.pexels_api_key.is_none() && config.unsplash_access_key.is_none() {
            log::warn!("No photo API keys set; themes will use curated images");
        }

        Ok(Self {
            http_client,
            pexels_api_key: config.pexels_api_key.clone(),
            unsplash_access_key: config.unsplash_access_key.clone(),
        })
    }

    /// First landscape photo for `query`, trying Pexels before Unsplash.
    pub async fn find(&self, query: &str) -> Option<String> {
        if let Some(key) = &self.pexels_api_key {
            match self.search_pexels(key, query).await {
                Ok(Some(url)) => return Some(url),
                Ok(None) => log::info!("Pexels had no photo for '{}'", query),
                Err(e) => log::warn!("Pexels failed, trying next source: {}", e),
            }
        }

        if let Some(key) = &self.unsplash_access_key {
            match self.search_unsplash(key, query).await {
                Ok(Some(url)) => return Some(url),
                Ok(None) => log::info!("Unsplash had no photo for '{}'", query),
                Err(e) => log::warn!("Unsplash failed, using fallback: {}", e),
            }
        }

        None
    }

    async fn search_pexels(&self, key: &str, query: &str) -> Result<Option<String>, ThemeError> {
        let url = search_url(PEXELS_SEARCH_URL, query)?;
        let response = self
            .http_client
            .get(url)
            .header("Authorization", key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ThemeError::Photo(format!("Pexels returned {}", response.status())));
        }

        let body: PexelsResponse = response.json().await?;
        Ok(body.photos.into_iter().next().map(|photo| photo.src.large2x))
    }

    async fn search_unsplash(&self, key: &str, query: &str) -> Result<Option<String>, ThemeError> {
        let url = search_url(UNSPLASH_SEARCH_URL, query)?;
        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Client-ID {}", key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ThemeError::Photo(format!("Unsplash returned {}", response.status())));
        }

        let body: UnsplashResponse = response.json().await?;
        Ok(body.results.into_iter().next().map(|photo| photo.urls.regular))
    }
}

fn search_url(base: &str, query: &str) -> Result<Url, ThemeError> {
    Url::parse_with_params(
        base,
        &[
            ("query", query),
            ("per_page", "1"),
            ("orientation", "landscape"),
        ],
    )
    .map_err(|e| ThemeError::Photo(e.to_string()))
}

pub struct ThemeService<L> {
    llm: Arc<L>,
    retry: RetryPolicy,
    photos: PhotoSearch,
}

impl<L: LlmClient> ThemeService<L> {
    pub fn new(llm: Arc<L>, retry: RetryPolicy, photos: PhotoSearch) -> Self {
        Self { llm, retry, photos }
    }

    /// Always returns a theme; failures yield `DestinationTheme::world()`.
    pub async fn theme_for(&self, destination: &str) -> DestinationTheme {
        match self.generate(destination).await {
            Ok(theme) => {
                log::info!("Image for {}: {}", destination, theme.background_image);
                theme
            }
            Err(e) => {
                log::error!("Theme generation error: {}", e);
                DestinationTheme::world()
            }
        }
    }

    async fn generate(&self, destination: &str) -> Result<DestinationTheme, ThemeError> {
        let prompt = theme_prompt(destination);
        let request = CompletionRequest {
            prompt: &prompt,
            max_tokens: THEME_MAX_TOKENS,
            temperature: THEME_TEMPERATURE,
        };

        let raw = complete_with_retry(self.llm.as_ref(), &self.retry, &request).await?;
        let palette: ThemePalette = serde_json::from_value(parse_llm_json(&raw)?)
            .map_err(|e| ThemeError::Shape(e.to_string()))?;

        let background_image = match self.photos.find(&palette.search_query).await {
            Some(url) => url,
            None => fallback_image(destination).to_string(),
        };

        Ok(DestinationTheme {
            palette,
            background_image,
            destination: destination.to_string(),
        })
    }
}

fn theme_prompt(destination: &str) -> String {
    format!(
        r##"For destination "{destination}", provide a travel theme.

Respond with ONLY this JSON (no markdown, no code blocks):
{{
  "searchQuery": "specific 2-3 word landmark (e.g., 'mysore palace', 'eiffel tower', 'tokyo shibuya')",
  "primaryColor": "#hexcode",
  "accentColor": "#hexcode",
  "gradient": "from-COLOR-600 via-COLOR-600 to-COLOR-600",
  "emojis": ["🏛️", "🕌"],
  "vibe": "3 descriptive words",
  "particleColor": "#hexcode"
}}

Examples:
Karnataka → {{"searchQuery": "mysore palace karnataka", "primaryColor": "#f59e0b", "accentColor": "#dc2626", "gradient": "from-amber-600 via-orange-600 to-red-600", "emojis": ["🕌", "🏛️"], "vibe": "historic temple serene", "particleColor": "#f59e0b"}}
Tokyo → {{"searchQuery": "tokyo tower shibuya", "primaryColor": "#ec4899", "accentColor": "#a855f7", "gradient": "from-pink-600 via-purple-600 to-indigo-600", "emojis": ["🗼", "🌸"], "vibe": "neon modern vibrant", "particleColor": "#ec4899"}}"##,
        destination = destination
    )
}
