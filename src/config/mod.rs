//! Application Configuration
//!
//! All directory layout decisions live here. The binary resolves CLI/env
//! values exactly once at startup and passes an [`AppConfig`] down into the
//! orchestrator — no module below this one reads the environment.
//!
//! ## Directory Layout
//!
//! - `data_dir`: measurement CSVs (quality.csv, process.csv, eco.csv)
//! - `kb_dir`: knowledge base (rule/target YAML files)
//! - `rules_dir`: secondary rules location, searched after `kb_dir`
//! - `logs_dir`: equipment log files for the maintenance agent

use std::path::{Path, PathBuf};

/// Application configuration for one server instance.
///
/// Cloned freely; all fields are plain paths.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Measurement data directory (CSV sources).
    pub data_dir: PathBuf,
    /// Knowledge-base directory (first rules search location).
    pub kb_dir: PathBuf,
    /// Secondary rules directory.
    pub rules_dir: PathBuf,
    /// Equipment log directory.
    pub logs_dir: PathBuf,
    /// Optional override directory searched before everything else.
    pub rules_override_dir: Option<PathBuf>,
    /// Retry budget for rate-limited reasoning calls.
    pub max_retries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            kb_dir: PathBuf::from("kb"),
            rules_dir: PathBuf::from("rules"),
            logs_dir: PathBuf::from("logs"),
            rules_override_dir: None,
            max_retries: 2,
        }
    }
}

impl AppConfig {
    /// Ordered search directories for rules files.
    ///
    /// Order: override (if set), knowledge base, rules, current directory.
    /// The literal path as given is always tried last by the loader itself.
    pub fn rules_search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(4);
        if let Some(ref d) = self.rules_override_dir {
            dirs.push(d.clone());
        }
        dirs.push(self.kb_dir.clone());
        dirs.push(self.rules_dir.clone());
        dirs.push(PathBuf::from("."));
        dirs
    }

    /// Default source file for an agent's data, relative to the layout.
    pub fn default_source(&self, filename: &str, from_logs: bool) -> PathBuf {
        let base: &Path = if from_logs { &self.logs_dir } else { &self.data_dir };
        base.join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_order_without_override() {
        let config = AppConfig::default();
        let dirs = config.rules_search_dirs();
        assert_eq!(dirs, vec![
            PathBuf::from("kb"),
            PathBuf::from("rules"),
            PathBuf::from("."),
        ]);
    }

    #[test]
    fn test_override_dir_searched_first() {
        let config = AppConfig {
            rules_override_dir: Some(PathBuf::from("/etc/smartops/rules")),
            ..AppConfig::default()
        };
        let dirs = config.rules_search_dirs();
        assert_eq!(dirs[0], PathBuf::from("/etc/smartops/rules"));
        assert_eq!(dirs[1], PathBuf::from("kb"));
    }

    #[test]
    fn test_default_source_paths() {
        let config = AppConfig::default();
        assert_eq!(
            config.default_source("quality.csv", false),
            PathBuf::from("data/quality.csv")
        );
        assert_eq!(
            config.default_source("system.log", true),
            PathBuf::from("logs/system.log")
        );
    }
}
