//! Diagnostic Report Assembly
//!
//! Reports are free text with a fixed section-header vocabulary, always
//! terminated by the end-of-report marker, or — when the model honors its
//! instructions — a JSON document matching one of the four per-domain
//! schemas in [`schema`].

pub mod fallback;
pub mod schema;

/// Literal marker terminating every free-text report.
pub const END_OF_REPORT: &str = "--- END OF REPORT ---";

/// Notice surfaced when the agent produced nothing and no fallback applies.
pub const EMPTY_RESPONSE_NOTICE: &str =
    "The agent returned an empty response. Please retry or check the input files.";

/// Guarantee the end-of-report marker terminates a free-text report.
pub fn ensure_end_marker(report: &str) -> String {
    let trimmed = report.trim_end();
    if trimmed.ends_with(END_OF_REPORT) {
        trimmed.to_string()
    } else {
        format!("{trimmed}\n{END_OF_REPORT}")
    }
}
