//! Agent Invocation with Rate-Limit Retry
//!
//! Wraps a single reasoning call in a bounded retry loop. Only the
//! rate-limit signal is retried; the suggested delay is parsed from the
//! error payload (default 30 s) and the wait is a task-scoped suspension
//! (`tokio::time::sleep`), so concurrent unrelated requests keep running.
//! Exhausting the budget is a terminal error distinct from any transient
//! failure.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use super::backend::{AgentResponse, BackendError, ReasoningBackend};
use super::{compose_prompt, AgentKind};

/// Retry behavior for rate-limited calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempt budget. Each rate-limited failure consumes one attempt.
    pub max_retries: usize,
    /// Delay used when the error payload carries no `retryDelay` hint.
    pub default_delay_secs: u64,
    /// Fixed grace period added on top of the suggested delay.
    pub grace_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            default_delay_secs: 30,
            grace_secs: 5,
        }
    }
}

/// Invocation failures.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Retry budget exhausted on repeated rate-limit signals.
    #[error("reasoning quota exhausted after {attempts} attempt(s)")]
    QuotaExhausted { attempts: usize },

    /// Non-transient backend failure, propagated without retry.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

fn retry_delay_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"retryDelay[^0-9]*([0-9]+)").expect("retry delay regex is valid"))
}

/// Parse the suggested retry delay (seconds) from a rate-limit payload.
fn suggested_delay_secs(message: &str, default_secs: u64) -> u64 {
    retry_delay_regex()
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .unwrap_or(default_secs)
}

/// Invoke one agent run against the reasoning backend.
///
/// Attempts are strictly sequential: an attempt completes or definitively
/// fails before the next begins, since each retry consumes the same
/// rate-limit budget upstream.
pub async fn invoke(
    backend: &dyn ReasoningBackend,
    kind: AgentKind,
    instruction: &str,
    policy: &RetryPolicy,
) -> Result<AgentResponse, InvokeError> {
    let profile = kind.profile();
    let prompt = compose_prompt(kind, instruction);

    for attempt in 1..=policy.max_retries {
        match backend.generate(&prompt, profile.toolset).await {
            Ok(response) => {
                info!(agent = kind.id(), attempt, backend = backend.backend_name(), "agent run complete");
                return Ok(response);
            }
            Err(BackendError::RateLimited { message }) => {
                let delay = suggested_delay_secs(&message, policy.default_delay_secs);
                warn!(
                    agent = kind.id(),
                    attempt,
                    delay_secs = delay,
                    "reasoning capability rate-limited"
                );
                // No point sleeping when the budget is already spent.
                if attempt < policy.max_retries {
                    tokio::time::sleep(Duration::from_secs(delay + policy.grace_secs)).await;
                }
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(InvokeError::QuotaExhausted {
        attempts: policy.max_retries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ToolCapability;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that replays a fixed script of outcomes.
    struct ScriptedBackend {
        script: Vec<Result<AgentResponse, BackendError>>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<AgentResponse, BackendError>>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReasoningBackend for ScriptedBackend {
        async fn generate(
            &self,
            _prompt: &str,
            _toolset: &[ToolCapability],
        ) -> Result<AgentResponse, BackendError> {
            let idx = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.get(idx) {
                Some(Ok(resp)) => Ok(resp.clone()),
                Some(Err(BackendError::RateLimited { message })) => {
                    Err(BackendError::RateLimited { message: message.clone() })
                }
                Some(Err(BackendError::Other(msg))) => Err(BackendError::Other(msg.clone())),
                None => Ok(AgentResponse::empty()),
            }
        }

        fn backend_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn fast_policy(max_retries: usize) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            default_delay_secs: 0,
            grace_secs: 0,
        }
    }

    fn rate_limited(msg: &str) -> Result<AgentResponse, BackendError> {
        Err(BackendError::RateLimited { message: msg.to_string() })
    }

    #[test]
    fn test_retry_delay_parsed_from_payload() {
        let msg = r#"429 RESOURCE_EXHAUSTED {"retryDelay": "10s"}"#;
        assert_eq!(suggested_delay_secs(msg, 30), 10);
    }

    #[test]
    fn test_retry_delay_defaults_when_absent() {
        assert_eq!(suggested_delay_secs("429 too many requests", 30), 30);
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let backend = ScriptedBackend::new(vec![Ok(AgentResponse::Text("ok".to_string()))]);
        let result = invoke(&backend, AgentKind::Quality, "Analyze a using b", &fast_policy(2)).await;
        assert!(result.is_ok());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_then_success_within_budget() {
        let backend = ScriptedBackend::new(vec![
            rate_limited("429 retryDelay: 0s"),
            Ok(AgentResponse::Text("recovered".to_string())),
        ]);
        let result = invoke(&backend, AgentKind::Quality, "Analyze a using b", &fast_policy(2)).await;
        assert!(matches!(result, Ok(AgentResponse::Text(t)) if t == "recovered"));
        assert_eq!(backend.calls(), 2);
    }

    /// Budget boundary: two rate-limited failures against a 2-attempt
    /// budget exhaust the quota even though a third call would succeed.
    #[tokio::test]
    async fn test_budget_exhaustion_before_third_attempt() {
        let backend = ScriptedBackend::new(vec![
            rate_limited("429 retryDelay: 0s"),
            rate_limited("429 retryDelay: 0s"),
            Ok(AgentResponse::Text("too late".to_string())),
        ]);
        let result = invoke(&backend, AgentKind::Quality, "Analyze a using b", &fast_policy(2)).await;
        match result {
            Err(InvokeError::QuotaExhausted { attempts }) => assert_eq!(attempts, 2),
            other => panic!("expected QuotaExhausted, got {other:?}"),
        }
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_transient_error_propagates_without_retry() {
        let backend = ScriptedBackend::new(vec![
            Err(BackendError::Other("model crashed".to_string())),
            Ok(AgentResponse::Text("never reached".to_string())),
        ]);
        let result = invoke(&backend, AgentKind::Process, "Analyze a using b", &fast_policy(3)).await;
        assert!(matches!(result, Err(InvokeError::Backend(BackendError::Other(_)))));
        assert_eq!(backend.calls(), 1);
    }
}
