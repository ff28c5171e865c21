//! Local Fallback Reporter (quality domain)
//!
//! When the reasoning path yields no usable text, the quality report is
//! recomputed deterministically from the source CSV and rules file. Same
//! inputs, same report — no randomness, no clock, no model. This is the
//! safety net that keeps the quality endpoint useful offline.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::END_OF_REPORT;
use crate::dataset::{DatasetError, Table};
use crate::knowledge::{Bound, RuleSet, RulesError, RulesLoader};
use crate::toolkit::deviation;

/// Parameters checked by the quality fallback: CSV column, report label,
/// display unit.
const QUALITY_PARAMETERS: [(&str, &str, &str); 3] = [
    ("humidity", "Humidity", "%"),
    ("density", "Density", " g/cm³"),
    ("thickness", "Thickness", " mm"),
];

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// One detected deviation: batch label, parameter label, description.
struct DeviationLine {
    batch: String,
    parameter: &'static str,
    description: String,
}

/// Build the deterministic quality report from a CSV and a rules file.
///
/// Both paths are taken as given (the orchestrator has already resolved
/// and existence-checked them).
pub fn quality_report(csv_path: &Path, rules_path: &Path) -> Result<String, FallbackError> {
    let table = Table::load(csv_path)?;
    // Literal-path loader: resolution already happened upstream.
    let rules = RulesLoader::new(Vec::new()).load(&rules_path.to_string_lossy())?;

    let mut batches: Vec<String> = Vec::new();
    let mut deviations: Vec<DeviationLine> = Vec::new();

    for row in 0..table.rows.len() {
        let batch = table.row_label(row);
        batches.push(batch.clone());

        for (column, label, unit) in QUALITY_PARAMETERS {
            let Some(value) = table.numeric(row, column) else {
                continue;
            };
            if let Some(description) = describe_if_deviant(value, rules.get(column), unit) {
                deviations.push(DeviationLine {
                    batch: batch.clone(),
                    parameter: label,
                    description,
                });
            }
        }
    }

    info!(
        batches = batches.len(),
        deviations = deviations.len(),
        "local quality fallback report computed"
    );

    Ok(render(csv_path, rules_path, &batches, &deviations))
}

/// Deviation description when the value falls outside a meaningful bound.
///
/// `None` for within-range values and for parameters without a usable
/// bound (both sides absent means "no reference", not a deviation).
fn describe_if_deviant(value: f64, bound: Option<&Bound>, unit: &str) -> Option<String> {
    let bound = bound.copied().unwrap_or_default();
    if bound.min.is_none() && bound.max.is_none() {
        return None;
    }
    if bound.contains(value) {
        return None;
    }
    Some(deviation::describe(value, bound.min, bound.max, unit))
}

fn render(
    csv_path: &Path,
    rules_path: &Path,
    batches: &[String],
    deviations: &[DeviationLine],
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("=== Quality Diagnostic Report ===".to_string());
    lines.push("Context:".to_string());
    lines.push(format!("Analyzed file: {}", csv_path.display()));
    lines.push(format!("Rules: {}", rules_path.display()));
    lines.push(String::new());
    lines.push("Summary:".to_string());
    let listed = if batches.is_empty() {
        "-".to_string()
    } else {
        batches.join(", ")
    };
    lines.push(format!("Batches analyzed: {listed}"));

    if deviations.is_empty() {
        lines.push(String::new());
        lines.push("Overall Assessment:".to_string());
        lines.push("All batches: Compliant".to_string());
        lines.push(END_OF_REPORT.to_string());
        return lines.join("\n");
    }

    lines.push(String::new());
    lines.push("Detected Deviations:".to_string());
    for d in deviations {
        lines.push(format!("- Batch {}: {} -> {}", d.batch, d.parameter, d.description));
    }

    lines.push(String::new());
    lines.push("Analysis & Interpretation:".to_string());
    lines.push(
        "Observed deviations suggest process drift or sensor calibration issues on affected batches."
            .to_string(),
    );
    lines.push(String::new());
    lines.push("Corrective and Preventive Recommendations:".to_string());
    lines.push("- Verify drying parameters and compression tooling; calibrate sensors.".to_string());
    lines.push("- Add in-process SPC for humidity & thickness.".to_string());
    lines.push(String::new());
    lines.push("Observations / Trends:".to_string());
    lines.push("Monitor next batches to confirm if deviations persist.".to_string());
    lines.push(String::new());
    lines.push("Overall Assessment:".to_string());
    lines.push("Mixed compliance. Non-conforming batches listed above.".to_string());
    lines.push(END_OF_REPORT.to_string());

    lines.join("\n")
}
