//! Rule / Target Knowledge Base
//!
//! Loads tolerance and target definitions from YAML files
//! (`quality_rules.yaml`, `process_rules.yaml`, `maintenance_rules.yaml`,
//! `eco_targets.yaml`). A rules file is a top-level mapping from parameter
//! name to a bound specification with optional `min` / `max` keys;
//! domain-specific extra keys are permitted and ignored by the core.
//!
//! ## Search Order
//!
//! 1. Configured override directory (if any)
//! 2. Knowledge-base directory (`kb/`)
//! 3. Rules directory (`rules/`)
//! 4. Current working directory
//! 5. The literal path as given
//!
//! The first existing regular file wins. A missing file fails loudly with
//! every candidate path listed; a file whose top level is not a mapping
//! fails with a validation error rather than silently coercing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Tolerance bound for one parameter. Either side may be open.
///
/// A bound with both sides absent means "no reference" — no deviation can
/// be computed against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bound {
    /// Whether a measured value sits inside the bound.
    ///
    /// An absent side is treated as open (always satisfied).
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min)
            && self.max.map_or(true, |max| value <= max)
    }
}

/// Parsed rules file: parameter name → bound.
///
/// Loaded fresh per invocation and never mutated afterwards. `BTreeMap`
/// keeps iteration deterministic for report output.
pub type RuleSet = BTreeMap<String, Bound>;

/// Rules loading failures.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("rules file not found; looked in: {}", candidates.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    NotFound { candidates: Vec<PathBuf> },

    #[error("rules file {path} is not a YAML mapping")]
    NotAMapping { path: PathBuf },

    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Resolves and parses named rules files across a fixed search path.
///
/// Construction is explicit: the search directories come from
/// [`crate::config::AppConfig`], never from hidden environment reads.
#[derive(Debug, Clone)]
pub struct RulesLoader {
    search_dirs: Vec<PathBuf>,
}

impl RulesLoader {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Candidate paths for a filename, in search order.
    ///
    /// Absolute paths skip the search directories entirely.
    fn candidates(&self, filename: &str) -> Vec<PathBuf> {
        let literal = PathBuf::from(filename);
        if literal.is_absolute() {
            return vec![literal];
        }
        let mut out: Vec<PathBuf> = self
            .search_dirs
            .iter()
            .map(|dir| dir.join(filename))
            .collect();
        out.push(literal);
        out
    }

    /// First existing regular file among the candidates for `filename`.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        self.candidates(filename).into_iter().find(|p| p.is_file())
    }

    /// Resolve `filename` and parse it into a [`RuleSet`].
    pub fn load(&self, filename: &str) -> Result<RuleSet, RulesError> {
        match self.resolve(filename) {
            Some(path) => {
                debug!(path = %path.display(), "loading rules file");
                load_rules_file(&path)
            }
            None => Err(RulesError::NotFound {
                candidates: self.candidates(filename),
            }),
        }
    }
}

/// Parse one YAML rules file into a [`RuleSet`].
///
/// The top level must be a mapping. Each value may carry `min`/`max` plus
/// arbitrary extra keys, which are dropped. An empty file yields an empty
/// rule set (matching `yaml.safe_load` returning nothing upstream).
fn load_rules_file(path: &Path) -> Result<RuleSet, RulesError> {
    let raw = fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if raw.trim().is_empty() {
        return Ok(RuleSet::new());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(&raw).map_err(|source| RulesError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

    let serde_yaml::Value::Mapping(mapping) = value else {
        return Err(RulesError::NotAMapping {
            path: path.to_path_buf(),
        });
    };

    let mut rules = RuleSet::new();
    for (key, entry) in mapping {
        let Some(name) = key.as_str() else { continue };
        let bound = match entry {
            serde_yaml::Value::Mapping(fields) => Bound {
                min: yaml_number(fields.get("min")),
                max: yaml_number(fields.get("max")),
            },
            // Scalar or list entries carry no bound information.
            _ => Bound::default(),
        };
        rules.insert(name.to_string(), bound);
    }

    Ok(rules)
}

fn yaml_number(value: Option<&serde_yaml::Value>) -> Option<f64> {
    value.and_then(serde_yaml::Value::as_f64)
}
