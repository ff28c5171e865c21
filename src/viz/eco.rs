//! Eco visualization: raw metric table plus per-batch resource bars.

use std::path::Path;

use super::{cell_value, ChartKind, ChartSpec, SeriesSpec, TableSpec, VizError, VizPayload};
use crate::dataset::Table;

/// Charted eco metric columns with display labels.
const SERIES_COLUMNS: [(&str, &str); 3] = [
    ("energy_kwh", "Energy kWh"),
    ("waste_kg", "Waste kg"),
    ("co2_kg", "CO₂ kg"),
];

/// Build the eco viz from a per-batch metrics CSV. Eco targets shape the
/// agent's verdicts, not the chart; the chart shows raw per-batch values.
pub fn build(csv_path: &Path) -> Result<VizPayload, VizError> {
    let table = Table::load(csv_path)?;

    let labels: Vec<String> = (0..table.rows.len()).map(|row| table.row_label(row)).collect();

    let datasets: Vec<SeriesSpec> = SERIES_COLUMNS
        .iter()
        .filter(|(col, _)| table.column_index(col).is_some())
        .map(|(col, label)| SeriesSpec {
            label: (*label).to_string(),
            data: (0..table.rows.len())
                .map(|row| table.numeric(row, col).unwrap_or(0.0))
                .collect(),
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| cell_value(c)).collect())
        .collect();

    Ok(VizPayload {
        tables: vec![TableSpec {
            title: "Eco Metrics".to_string(),
            columns: table.columns.clone(),
            rows,
        }],
        charts: vec![ChartSpec {
            title: "Per-batch Metrics".to_string(),
            kind: ChartKind::Bar,
            labels,
            datasets,
        }],
    })
}
