//! Measurement Dataset Loading
//!
//! Short-lived tabular acquisitions: open, parse, close. A [`Table`] owns
//! its rows for the duration of one agent run and is never shared mutably.
//!
//! Two source shapes exist:
//! - CSV with a header row (quality / process / eco measurements)
//! - free-text equipment logs for the maintenance domain (see [`logfile`])

pub mod logfile;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Dataset loading failures.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },
}

/// One parsed CSV file: header columns plus raw string rows.
///
/// Cells stay as text until a caller asks for a numeric view; a cell that
/// fails coercion is reported as `None` rather than aborting the table.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Load a CSV file with a header row.
    ///
    /// Blank lines are skipped; short rows are padded with empty cells so
    /// column indexing stays uniform.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = raw.lines().filter(|l| !l.trim().is_empty());
        let header = lines.next().ok_or_else(|| DatasetError::MissingHeader {
            path: path.to_path_buf(),
        })?;

        let columns: Vec<String> = csv_split(header)
            .into_iter()
            .map(|c| c.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for line in lines {
            let mut fields: Vec<String> = csv_split(line)
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect();
            fields.resize(columns.len(), String::new());
            rows.push(fields);
        }

        Ok(Self { columns, rows })
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Raw cell text for `(row, column-name)`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Numeric view of a cell. `None` when the column is absent or the
    /// cell does not parse as a finite float.
    pub fn numeric(&self, row: usize, column: &str) -> Option<f64> {
        self.cell(row, column)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Full numeric column, skipping cells that fail coercion.
    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        (0..self.rows.len())
            .filter_map(|row| self.numeric(row, column))
            .collect()
    }

    /// Row label for charts and reports: `batch_id` cell when the column
    /// exists and is non-empty, otherwise the 0-based row index.
    pub fn row_label(&self, row: usize) -> String {
        match self.cell(row, "batch_id") {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => row.to_string(),
        }
    }
}

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table_from(contents: &str) -> Table {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        Table::load(f.path()).unwrap()
    }

    #[test]
    fn test_load_quality_csv() {
        let table = table_from(
            "batch_id,humidity,density,thickness\n32,11.3,0.52,5.0\n33,10.1,0.47,5.1\n",
        );
        assert_eq!(table.columns, vec!["batch_id", "humidity", "density", "thickness"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.numeric(0, "humidity"), Some(11.3));
        assert_eq!(table.cell(1, "batch_id"), Some("33"));
    }

    #[test]
    fn test_non_numeric_cell_is_none_not_error() {
        let table = table_from("batch_id,humidity\n32,n/a\n33,10.5\n");
        assert_eq!(table.numeric(0, "humidity"), None);
        assert_eq!(table.numeric_column("humidity"), vec![10.5]);
    }

    #[test]
    fn test_quoted_fields() {
        let table = table_from("batch_id,note\n32,\"ok, retest\"\n");
        assert_eq!(table.cell(0, "note"), Some("ok, retest"));
    }

    #[test]
    fn test_short_rows_padded() {
        let table = table_from("a,b,c\n1,2\n");
        assert_eq!(table.cell(0, "c"), Some(""));
        assert_eq!(table.numeric(0, "c"), None);
    }

    #[test]
    fn test_missing_header_rejected() {
        let f = NamedTempFile::new().unwrap();
        let err = Table::load(f.path()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingHeader { .. }));
    }

    #[test]
    fn test_row_labels_prefer_batch_id() {
        let with_ids = table_from("batch_id,x\n31,1\n34,2\n");
        assert_eq!(with_ids.row_label(1), "34");

        let without = table_from("x,y\n1,2\n3,4\n");
        assert_eq!(without.row_label(1), "1");
    }
}
