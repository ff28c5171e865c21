//! Maintenance visualization: recent log events table plus fault counters.

use std::path::Path;

use serde_json::json;

use super::{ChartKind, ChartSpec, SeriesSpec, TableSpec, VizError, VizPayload};
use crate::dataset::logfile::LogFile;

/// How many trailing log events the table shows.
const RECENT_EVENTS: usize = 50;

/// Build the maintenance viz from an equipment log file.
pub fn build(log_path: &Path) -> Result<VizPayload, VizError> {
    let log = LogFile::load(log_path)?;

    let rows = log
        .recent(RECENT_EVENTS)
        .iter()
        .map(|event| {
            vec![
                json!(event.timestamp.as_deref().unwrap_or("—")),
                json!(event.level.map_or("—", |l| l.as_str())),
                json!(event.message),
            ]
        })
        .collect();

    let labels: Vec<String> = log.fault_counts.iter().map(|c| c.label.clone()).collect();
    let counts: Vec<f64> = log.fault_counts.iter().map(|c| c.count as f64).collect();

    Ok(VizPayload {
        tables: vec![TableSpec {
            title: "Recent Log Events".to_string(),
            columns: vec!["Time".to_string(), "Level".to_string(), "Message".to_string()],
            rows,
        }],
        charts: vec![ChartSpec {
            title: "Fault Counters".to_string(),
            kind: ChartKind::Bar,
            labels,
            datasets: vec![SeriesSpec {
                label: "Count".to_string(),
                data: counts,
            }],
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
2025-01-10 08:12:03 module=thz ERROR sensor: sensor lost on line 2
unstructured maintenance note
2025-01-10 08:14:10 module=thz WARN cooling: frequency drift detected
";

    fn build_from(log: &str) -> VizPayload {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("system.log");
        fs::write(&path, log).unwrap();
        build(&path).unwrap()
    }

    #[test]
    fn test_events_table_with_placeholders() {
        let viz = build_from(SAMPLE);
        let rows = &viz.tables[0].rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][1], serde_json::json!("ERROR"));
        assert_eq!(rows[1][0], serde_json::json!("—"));
        assert_eq!(rows[1][1], serde_json::json!("—"));
        assert_eq!(rows[1][2], serde_json::json!("unstructured maintenance note"));
    }

    #[test]
    fn test_fault_counter_chart() {
        let viz = build_from(SAMPLE);
        let chart = &viz.charts[0];
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(
            chart.labels,
            vec!["sensor lost", "frequency drift", "overheat", "ERROR", "WARN"]
        );
        assert_eq!(chart.datasets[0].data, vec![1.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_table_limited_to_recent_events() {
        let mut log = String::new();
        for i in 0..80 {
            log.push_str(&format!(
                "2025-01-10 08:{:02}:00 module=thz INFO status: tick {i}\n",
                i % 60
            ));
        }
        let viz = build_from(&log);
        assert_eq!(viz.tables[0].rows.len(), RECENT_EVENTS);
        // The last event in the table is the last line of the file.
        let last = viz.tables[0].rows.last().unwrap();
        assert_eq!(last[2], serde_json::json!("tick 79"));
    }
}
