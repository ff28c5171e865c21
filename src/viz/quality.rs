//! Quality visualization: measurement table with compliance status plus a
//! positive-only deviation-over-max chart.

use std::path::Path;

use serde_json::json;

use super::{cell_value, ChartKind, ChartSpec, SeriesSpec, TableSpec, VizError, VizPayload};
use crate::dataset::Table;
use crate::knowledge::{Bound, RuleSet, RulesLoader};

/// Build the quality viz from a measurement CSV and its rules file.
pub fn build(csv_path: &Path, rules_path: &Path) -> Result<VizPayload, VizError> {
    let table = Table::load(csv_path)?;
    let rules = RulesLoader::new(Vec::new()).load(&rules_path.to_string_lossy())?;

    let hum = bound(&rules, "humidity");
    let den = bound(&rules, "density");
    let th = bound(&rules, "thickness");

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut labels = Vec::with_capacity(table.rows.len());
    let mut hum_over = Vec::with_capacity(table.rows.len());
    let mut th_over = Vec::with_capacity(table.rows.len());

    for row in 0..table.rows.len() {
        let label = table.row_label(row);
        let h = table.numeric(row, "humidity");
        let d = table.numeric(row, "density");
        let t = table.numeric(row, "thickness");

        // Unassessable parameters count as non-conforming.
        let ok = assessable_and_within(h, hum)
            && assessable_and_within(d, den)
            && assessable_and_within(t, th);

        rows.push(vec![
            json!(label),
            raw_cell(&table, row, "humidity"),
            raw_cell(&table, row, "density"),
            raw_cell(&table, row, "thickness"),
            json!(if ok { "OK" } else { "NON-CONFORM" }),
        ]);

        hum_over.push(over_max(h, hum.max));
        th_over.push(over_max(t, th.max));
        labels.push(label);
    }

    Ok(VizPayload {
        tables: vec![TableSpec {
            title: "Batch Measurements".to_string(),
            columns: vec![
                "Batch".to_string(),
                "Humidity %".to_string(),
                "Density g/cm³".to_string(),
                "Thickness mm".to_string(),
                "Status".to_string(),
            ],
            rows,
        }],
        charts: vec![ChartSpec {
            title: "Deviations over Max (positive only)".to_string(),
            kind: ChartKind::Bar,
            labels,
            datasets: vec![
                SeriesSpec { label: "Humidity Δ over max".to_string(), data: hum_over },
                SeriesSpec { label: "Thickness Δ over max".to_string(), data: th_over },
            ],
        }],
    })
}

fn bound(rules: &RuleSet, parameter: &str) -> Bound {
    rules.get(parameter).copied().unwrap_or_default()
}

fn raw_cell(table: &Table, row: usize, column: &str) -> serde_json::Value {
    cell_value(table.cell(row, column).unwrap_or(""))
}

fn assessable_and_within(value: Option<f64>, bound: Bound) -> bool {
    value.is_some_and(|v| bound.contains(v))
}

/// Positive-only deviation over the max bound, 4-decimal rounded.
/// Zero when the value is missing, unparseable, or within range.
fn over_max(value: Option<f64>, max: Option<f64>) -> f64 {
    match (value, max) {
        (Some(v), Some(max)) => (((v - max).max(0.0)) * 10_000.0).round() / 10_000.0,
        _ => 0.0,
    }
}
