//! Equipment Log Parsing
//!
//! The maintenance domain reads free-text log files instead of CSV.
//! Lines of the form `YYYY-MM-DD HH:MM:SS ... LEVEL ...: message` are
//! matched structurally; anything else is kept as an unparsed entry so
//! the viz table never drops operator-visible text.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Log severity extracted from a matched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl LogLevel {
    fn from_token(token: &str) -> Self {
        match token {
            "ERROR" => Self::Error,
            "WARN" | "WARNING" => Self::Warn,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
        }
    }
}

/// One log line, structured when the timestamp/level pattern matched.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// `YYYY-MM-DD HH:MM:SS` timestamp, absent for unmatched lines.
    pub timestamp: Option<String>,
    pub level: Option<LogLevel>,
    pub message: String,
}

/// Known fault patterns counted for the maintenance fault chart.
pub const FAULT_PATTERNS: [&str; 3] = ["sensor lost", "frequency drift", "overheat"];

/// Counter for one fault or level pattern.
#[derive(Debug, Clone)]
pub struct FaultCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Error)]
pub enum LogfileError {
    #[error("failed to read log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn event_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}).*?\b(ERROR|WARNING|WARN|INFO)\b.*?:\s*(.*)$",
        )
        .expect("log event regex is valid")
    })
}

/// Parsed log file: events in file order plus fault/level counters.
#[derive(Debug, Clone)]
pub struct LogFile {
    pub events: Vec<LogEvent>,
    pub fault_counts: Vec<FaultCount>,
}

impl LogFile {
    /// Read and parse a log file. Non-matching lines become unstructured
    /// events; the file as a whole never fails on content, only on I/O.
    pub fn load(path: &Path) -> Result<Self, LogfileError> {
        let raw = fs::read_to_string(path).map_err(|source| LogfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&raw))
    }

    /// Parse raw log text.
    pub fn parse(raw: &str) -> Self {
        let re = event_regex();
        let mut events = Vec::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match re.captures(line) {
                Some(caps) => events.push(LogEvent {
                    timestamp: Some(caps[1].to_string()),
                    level: Some(LogLevel::from_token(&caps[2])),
                    message: caps[3].to_string(),
                }),
                None => events.push(LogEvent {
                    timestamp: None,
                    level: None,
                    // Long unstructured lines are truncated for table display.
                    message: line.chars().take(200).collect(),
                }),
            }
        }

        let fault_counts = count_faults(raw, &events);
        Self { events, fault_counts }
    }

    /// The most recent `n` events.
    pub fn recent(&self, n: usize) -> &[LogEvent] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }
}

/// Count known fault phrases (case-insensitive) and ERROR/WARN levels.
fn count_faults(raw: &str, events: &[LogEvent]) -> Vec<FaultCount> {
    let lower = raw.to_lowercase();
    let mut counts: Vec<FaultCount> = FAULT_PATTERNS
        .iter()
        .map(|pattern| FaultCount {
            label: (*pattern).to_string(),
            count: lower.matches(pattern).count(),
        })
        .collect();

    counts.push(FaultCount {
        label: "ERROR".to_string(),
        count: events
            .iter()
            .filter(|e| e.level == Some(LogLevel::Error))
            .count(),
    });
    counts.push(FaultCount {
        label: "WARN".to_string(),
        count: events
            .iter()
            .filter(|e| e.level == Some(LogLevel::Warn))
            .count(),
    });

    counts
}
