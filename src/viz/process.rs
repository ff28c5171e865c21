//! Process visualization: raw metric table plus a time-series line chart.

use std::path::Path;

use super::{cell_value, ChartKind, ChartSpec, SeriesSpec, TableSpec, VizError, VizPayload};
use crate::dataset::Table;

/// Process metric columns charted when present.
const SERIES_COLUMNS: [&str; 3] = ["speed_mpm", "temperature_c", "density_gcm3"];

/// Build the process viz from a metrics CSV. The process rules file does
/// not shape the visualization; only the measured series are drawn.
pub fn build(csv_path: &Path) -> Result<VizPayload, VizError> {
    let table = Table::load(csv_path)?;

    let labels: Vec<String> = (0..table.rows.len()).map(|i| i.to_string()).collect();

    let datasets: Vec<SeriesSpec> = SERIES_COLUMNS
        .iter()
        .filter(|col| table.column_index(col).is_some())
        .map(|col| SeriesSpec {
            label: (*col).to_string(),
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
            title: "Process Metrics".to_string(),
            columns: table.columns.clone(),
            rows,
        }],
        charts: vec![ChartSpec {
            title: "Process Time Series".to_string(),
            kind: ChartKind::Line,
            labels,
            datasets,
        }],
    })
}
