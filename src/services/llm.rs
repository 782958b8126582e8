pub mod groq;
pub mod retry;

use std::fmt;

/// One single-prompt completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug)]
pub enum LlmError {
    NotConfigured(String),
    Timeout,
    RateLimited(String),
    Authentication(String),
    InvalidRequest { status: u16, message: String },
    Server { status: u16, message: String },
    Network(String),
    EmptyResponse,
}

impl LlmError {
    /// Maps a non-success HTTP status from the provider to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => LlmError::Authentication(body.to_string()),
            429 => LlmError::RateLimited(body.to_string()),
            500..=599 => LlmError::Server {
                status,
                message: body.to_string(),
            },
            _ => LlmError::InvalidRequest {
                status,
                message: body.to_string(),
            },
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        match self {
            LlmError::RateLimited(_) => true,
            LlmError::InvalidRequest { message, .. } | LlmError::Server { message, .. } => {
                let lower = message.to_lowercase();
                lower.contains("429") || lower.contains("quota") || lower.contains("rate limit")
            }
            _ => false,
        }
    }

    pub fn is_retryable(&self) -> bool {
        !matches!(self, LlmError::NotConfigured(_))
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::NotConfigured(msg) => write!(f, "LLM not configured: {}", msg),
            LlmError::Timeout => write!(f, "LLM request timed out"),
            LlmError::RateLimited(msg) => write!(f, "LLM rate limit exceeded: {}", msg),
            LlmError::Authentication(msg) => write!(f, "LLM authentication failed: {}", msg),
            LlmError::InvalidRequest { status, message } => {
                write!(f, "LLM rejected request ({}): {}", status, message)
            }
            LlmError::Server { status, message } => {
                write!(f, "LLM server error ({}): {}", status, message)
            }
            LlmError::Network(msg) => write!(f, "LLM network error: {}", msg),
            LlmError::EmptyResponse => write!(f, "LLM returned no content"),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if let Some(status) = err.status() {
            LlmError::from_status(status.as_u16(), &err.to_string())
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

/// A text-completion backend. Implemented by the Groq client and by test doubles.
/// Futures are not required to be `Send`; handlers run on actix's local arbiters.
#[allow(async_fn_in_trait)]
pub trait LlmClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError>;
}
