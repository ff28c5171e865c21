//! Run Orchestration
//!
//! One agent run, end to end:
//!
//! 1. invoke the reasoning backend with the instruction (retry on rate
//!    limits, see [`crate::agent::invoker`])
//! 2. extract the text payload from the heterogeneous response
//! 3. empty text → deterministic local fallback when the agent has one
//!    and its referenced files exist, otherwise a fixed notice
//! 4. independently of which report path won, build the domain
//!    visualization from the parsed source file when it exists
//!
//! Visualization failures never fail the run: they are logged and the viz
//! is simply omitted. Runs are stateless — every file is re-read per
//! invocation and nothing is written.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::agent::invoker::{self, RetryPolicy};
use crate::agent::{AgentKind, InvokeError, ReasoningBackend};
use crate::command;
use crate::config::AppConfig;
use crate::knowledge::RulesLoader;
use crate::report::{self, fallback};
use crate::viz::{self, VizPayload};

/// Orchestration failures surfaced to the API boundary.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("fallback report failed: {0}")]
    Fallback(#[from] fallback::FallbackError),
}

/// Result of one agent run.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    /// Free-text (marker-terminated) or model-produced JSON report.
    pub report: String,
    /// Chart/table payload, present when the source file was buildable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viz: Option<VizPayload>,
}

/// Coordinates agents, the reasoning backend, and the local paths.
pub struct Orchestrator {
    backend: Arc<dyn ReasoningBackend>,
    config: AppConfig,
    retry_policy: RetryPolicy,
    rules_loader: RulesLoader,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn ReasoningBackend>, config: AppConfig) -> Self {
        let retry_policy = RetryPolicy {
            max_retries: config.max_retries,
            ..RetryPolicy::default()
        };
        let rules_loader = RulesLoader::new(config.rules_search_dirs());
        Self {
            backend,
            config,
            retry_policy,
            rules_loader,
        }
    }

    /// Default instruction for an agent when the caller supplies none.
    pub fn default_instruction(&self, kind: AgentKind) -> String {
        let profile = kind.profile();
        let source = self
            .config
            .default_source(profile.default_source_file, profile.source_from_logs);
        let rules = self.config.kb_dir.join(profile.default_rules_file);
        format!("Analyze {} using {}", source.display(), rules.display())
    }

    /// Execute one agent run.
    pub async fn run(
        &self,
        kind: AgentKind,
        instruction: &str,
    ) -> Result<RunOutcome, OrchestratorError> {
        let response =
            invoker::invoke(self.backend.as_ref(), kind, instruction, &self.retry_policy).await?;
        let text = crate::agent::extract_text(&response);

        let (source, rules) = command::parse_analyze(instruction);
        let source = source.map(PathBuf::from);
        // Rules names go through the knowledge-base search path; a name
        // that resolves nowhere is the same as no rules context at all.
        let rules = rules.and_then(|name| self.rules_loader.resolve(&name));

        let report = if text.is_empty() {
            self.empty_response_report(kind, source.as_deref(), rules.as_deref())?
        } else {
            // Models that answer in schema JSON tend to wrap it in a
            // markdown code fence; strip that before shipping the report.
            report::schema::clean_json_block(&text)
        };
        let report = report::ensure_end_marker(&report);

        // Viz is computed from source files regardless of which report
        // path was taken, and its failure never fails the run.
        let viz = self.try_build_viz(kind, source.as_deref(), rules.as_deref());

        Ok(RunOutcome { report, viz })
    }

    /// Report path for an empty model response: deterministic fallback
    /// when available and both referenced files exist, fixed notice
    /// otherwise.
    fn empty_response_report(
        &self,
        kind: AgentKind,
        source: Option<&Path>,
        rules: Option<&Path>,
    ) -> Result<String, OrchestratorError> {
        if kind.has_local_fallback() {
            // Rules are pre-resolved; only the source still needs a check.
            if let (Some(source), Some(rules)) = (source, rules) {
                if source.is_file() {
                    info!(agent = kind.id(), "empty agent response, using local fallback report");
                    return Ok(fallback::quality_report(source, rules)?);
                }
            }
        }
        info!(agent = kind.id(), "empty agent response, no fallback available");
        Ok(report::EMPTY_RESPONSE_NOTICE.to_string())
    }

    fn try_build_viz(
        &self,
        kind: AgentKind,
        source: Option<&Path>,
        rules: Option<&Path>,
    ) -> Option<VizPayload> {
        let source = source.filter(|p| p.is_file())?;

        match viz::build_viz(kind, source, rules) {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!(agent = kind.id(), error = %err, "visualization build failed; omitting viz");
                None
            }
        }
    }
}
