//! SmartOps: Multi-Agent Industrial Diagnostics
//!
//! Orchestration core for four domain-specialized diagnostic agents that
//! turn raw measurement data plus a rules file into a structured report.
//!
//! ## Architecture
//!
//! - **Agents**: quality / process / maintenance / eco profiles with
//!   declared toolsets against an opaque reasoning backend
//! - **Toolkit**: deterministic deviation / trend / outlier calculations
//! - **Orchestrator**: invoke → extract → fallback-or-notice, plus
//!   independent chart/table payloads built straight from source files
//! - **API**: thin axum boundary returning `{ok, report, viz?}` envelopes

pub mod agent;
pub mod api;
pub mod command;
pub mod config;
pub mod dataset;
pub mod knowledge;
pub mod orchestrator;
pub mod report;
pub mod toolkit;
pub mod viz;

// Re-export commonly used types
pub use agent::{AgentKind, AgentResponse, ReasoningBackend};
pub use config::AppConfig;
pub use knowledge::{Bound, RuleSet, RulesError, RulesLoader};
pub use orchestrator::{Orchestrator, RunOutcome};
pub use viz::VizPayload;
