//! Visualization Payloads
//!
//! Chart/table structures built directly from source files, independent of
//! whatever the reasoning path reported. A [`VizPayload`] is purely
//! transport-shaped: the dashboard renders it verbatim.
//!
//! ## Malformed cell policy
//!
//! A cell that fails numeric coercion never aborts a build. Tables keep
//! the raw text verbatim; chart series zero-fill the slot so every series
//! stays aligned with its category labels; the quality status column
//! treats an unassessable parameter as non-conforming. One policy, all
//! four builders.

pub mod eco;
pub mod maintenance;
pub mod process;
pub mod quality;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::agent::AgentKind;
use crate::dataset::logfile::LogfileError;
use crate::dataset::DatasetError;
use crate::knowledge::RulesError;

/// Chart rendering kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// One named numeric series, aligned to the chart's labels.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSpec {
    pub label: String,
    pub data: Vec<f64>,
}

/// One chart: ordered category labels plus aligned series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<SeriesSpec>,
}

/// One table: ordered columns plus rows of JSON cells.
#[derive(Debug, Clone, Serialize)]
pub struct TableSpec {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// The full visualization payload for one agent run.
#[derive(Debug, Clone, Serialize)]
pub struct VizPayload {
    pub tables: Vec<TableSpec>,
    pub charts: Vec<ChartSpec>,
}

/// Visualization build failures. These are isolated by the orchestrator —
/// a failed build drops the viz, never the report.
#[derive(Debug, Error)]
pub enum VizError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Logfile(#[from] LogfileError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("{agent} visualization requires a rules file")]
    RulesRequired { agent: &'static str },
}

/// Cell helper: numeric when the text parses, verbatim string otherwise.
pub(crate) fn cell_value(raw: &str) -> serde_json::Value {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => serde_json::Number::from_f64(v)
            .map_or_else(|| serde_json::Value::String(raw.to_string()), serde_json::Value::Number),
        _ => serde_json::Value::String(raw.to_string()),
    }
}

/// Build the visualization for one agent domain.
///
/// Quality requires a resolvable rules file; the other domains take it
/// as optional context and may ignore it.
pub fn build_viz(
    kind: AgentKind,
    source: &Path,
    rules: Option<&Path>,
) -> Result<VizPayload, VizError> {
    match kind {
        AgentKind::Quality => {
            let rules = rules.ok_or(VizError::RulesRequired { agent: "quality" })?;
            quality::build(source, rules)
        }
        AgentKind::Process => process::build(source),
        AgentKind::Maintenance => maintenance::build(source),
        AgentKind::Eco => eco::build(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_numeric_vs_text() {
        assert_eq!(cell_value("1.5"), serde_json::json!(1.5));
        assert_eq!(cell_value("32"), serde_json::json!(32.0));
        assert_eq!(cell_value("n/a"), serde_json::json!("n/a"));
        assert_eq!(cell_value(""), serde_json::json!(""));
    }

    #[test]
    fn test_quality_without_rules_is_an_error() {
        let err = build_viz(AgentKind::Quality, Path::new("x.csv"), None).unwrap_err();
        assert!(matches!(err, VizError::RulesRequired { agent: "quality" }));
    }

    #[test]
    fn test_chart_kind_serializes_lowercase() {
        let chart = ChartSpec {
            title: "t".to_string(),
            kind: ChartKind::Bar,
            labels: vec![],
            datasets: vec![],
        };
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["type"], "bar");
    }
}
