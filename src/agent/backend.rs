//! Reasoning Backend Boundary
//!
//! The language model is an external collaborator: given a prompt and a
//! declared toolset it returns an [`AgentResponse`] or fails. Responses
//! arrive in several shapes depending on the upstream wrapper, so the
//! type is an explicit tagged union rather than a single string.

use async_trait::async_trait;
use thiserror::Error;

use super::ToolCapability;

/// One turn of a structured exchange. The last turn's content is the
/// authoritative payload when no direct content field is present.
#[derive(Debug, Clone, Default)]
pub struct ExchangeTurn {
    pub role: String,
    pub content: Option<String>,
}

/// Structured response body with every known content access point.
///
/// Any combination of fields may be populated; extraction applies a fixed
/// priority order (see [`super::extract_text`]).
#[derive(Debug, Clone, Default)]
pub struct StructuredOutput {
    /// Direct content field — highest-priority candidate.
    pub content: Option<String>,
    /// Alternate output-text accessor.
    pub output_text: Option<String>,
    /// Sequential exchange turns, in order.
    pub turns: Vec<ExchangeTurn>,
}

/// Response shapes the reasoning capability is known to produce.
#[derive(Debug, Clone)]
pub enum AgentResponse {
    /// Plain text payload.
    Text(String),
    /// Structured object with one or more content access points.
    Structured(StructuredOutput),
}

impl AgentResponse {
    /// An empty structured response — what an unconfigured backend yields.
    pub fn empty() -> Self {
        Self::Structured(StructuredOutput::default())
    }
}

/// Failures at the reasoning boundary.
///
/// Rate limiting is the only transient class; everything else propagates
/// to the caller without retry.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Quota / rate-limit signal (429-style). The raw message may embed a
    /// machine-parseable `retryDelay` hint.
    #[error("reasoning capability rate-limited: {message}")]
    RateLimited { message: String },

    /// Any other transport or model failure.
    #[error("reasoning capability failed: {0}")]
    Other(String),
}

/// Opaque reasoning capability: prompt + declared toolset in, response out.
#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        toolset: &[ToolCapability],
    ) -> Result<AgentResponse, BackendError>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}

/// Backend used when no model endpoint is configured.
///
/// Always returns an empty structured response, which routes every run
/// through the deterministic local paths (fallback report + viz).
pub struct OfflineBackend;

#[async_trait]
impl ReasoningBackend for OfflineBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _toolset: &[ToolCapability],
    ) -> Result<AgentResponse, BackendError> {
        Ok(AgentResponse::empty())
    }

    fn backend_name(&self) -> &'static str {
        "offline"
    }
}
