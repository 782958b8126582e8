use std::time::Duration;

use super::{CompletionRequest, LlmClient, LlmError};
use crate::config::LlmConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before attempt `attempt + 1`, growing linearly.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

impl From<&LlmConfig> for RetryPolicy {
    fn from(config: &LlmConfig) -> Self {
        Self::new(config.max_attempts, config.retry_delay)
    }
}

/// Calls the model up to `policy.max_attempts` times, sleeping between
/// attempts. Returns the last error once the attempts are used up.
pub async fn complete_with_retry<L: LlmClient>(
    client: &L,
    policy: &RetryPolicy,
    request: &CompletionRequest<'_>,
) -> Result<String, LlmError> {
    let mut attempt = 1;
    loop {
        match client.complete(request).await {
            Ok(text) => {
                if attempt > 1 {
                    log::info!("LLM call succeeded on attempt {}", attempt);
                }
                return Ok(text);
            }
            Err(e) if attempt < policy.max_attempts && e.is_retryable() => {
                let delay = policy.delay_after(attempt);
                log::warn!(
                    "LLM attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt,
                    policy.max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                log::error!("LLM call failed after {} attempt(s): {}", attempt, e);
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FailingThen {
        failures: u32,
        calls: Cell<u32>,
    }

    impl LlmClient for FailingThen {
        async fn complete(&self, _request: &CompletionRequest<'_>) -> Result<String, LlmError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.failures {
                Err(LlmError::Server {
                    status: 503,
                    message: "overloaded".to_string(),
                })
            } else {
                Ok("ok".to_string())
            }
        }
    }

    fn request() -> CompletionRequest<'static> {
        CompletionRequest {
            prompt: "hello",
            max_tokens: 16,
            temperature: 0.0,
        }
    }

    #[test]
    fn test_linear_delays() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_succeeds_on_last_attempt() {
        let client = FailingThen {
            failures: 2,
            calls: Cell::new(0),
        };
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = tokio_test::block_on(complete_with_retry(&client, &policy, &request()));
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(client.calls.get(), 3);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let client = FailingThen {
            failures: 10,
            calls: Cell::new(0),
        };
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = tokio_test::block_on(complete_with_retry(&client, &policy, &request()));
        assert!(matches!(result, Err(LlmError::Server { status: 503, .. })));
        assert_eq!(client.calls.get(), 3);
    }

    #[test]
    fn test_not_configured_is_not_retried() {
        struct Unconfigured(Cell<u32>);

        impl LlmClient for Unconfigured {
            async fn complete(&self, _request: &CompletionRequest<'_>) -> Result<String, LlmError> {
                self.0.set(self.0.get() + 1);
                Err(LlmError::NotConfigured("GROQ_API_KEY not set".to_string()))
            }
        }

        let client = Unconfigured(Cell::new(0));
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let result = tokio_test::block_on(complete_with_retry(&client, &policy, &request()));

        assert!(matches!(result, Err(LlmError::NotConfigured(_))));
        assert_eq!(client.0.get(), 1);
    }
}
