use std::{env, fmt, time::Duration};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const LLM_TIMEOUT_SECS: u64 = 30;
const LLM_MAX_ATTEMPTS: u32 = 3;
const LLM_RETRY_DELAY_MS: u64 = 1000;
const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the chat-completions provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: GROQ_API_URL.to_string(),
            api_key: None,
            model: GROQ_MODEL.to_string(),
            timeout: Duration::from_secs(LLM_TIMEOUT_SECS),
            max_attempts: LLM_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(LLM_RETRY_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhotoConfig {
    pub pexels_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
    pub photos: PhotoConfig,
    pub default_currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            llm: LlmConfig::default(),
            photos: PhotoConfig::default(),
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Unset keys fall back to defaults; set but
    /// unparsable numeric keys are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let llm = LlmConfig {
            api_url: env::var("GROQ_API_URL").unwrap_or(defaults.llm.api_url),
            api_key: non_empty_var("GROQ_API_KEY"),
            model: env::var("GROQ_MODEL").unwrap_or(defaults.llm.model),
            timeout: Duration::from_secs(parse_var("LLM_TIMEOUT_SECS", LLM_TIMEOUT_SECS)?),
            max_attempts: parse_var("LLM_MAX_ATTEMPTS", LLM_MAX_ATTEMPTS)?.max(1),
            retry_delay: Duration::from_millis(parse_var(
                "LLM_RETRY_DELAY_MS",
                LLM_RETRY_DELAY_MS,
            )?),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", PORT)?,
            llm,
            photos: PhotoConfig {
                pexels_api_key: non_empty_var("PEXELS_API_KEY"),
                unsplash_access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
            },
            default_currency: env::var("DEFAULT_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(defaults.default_currency),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
