//! Command Instruction Parsing
//!
//! Agent runs are driven by a stylized natural-language instruction:
//! `Analyze <source> using <rules>` (case-insensitive, each path optionally
//! quoted). Parsing is a pure function over the two-group grammar; a
//! non-matching instruction yields no file context rather than an error.

use std::sync::OnceLock;

use regex::Regex;

fn analyze_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)analyze\s+(.+?)\s+using\s+(.+)").expect("analyze command regex is valid")
    })
}

/// Extract `(source, rules)` paths from an instruction.
///
/// Both are `None` when the `Analyze ... using ...` pattern is absent —
/// the caller treats that as "no file context available".
pub fn parse_analyze(instruction: &str) -> (Option<String>, Option<String>) {
    let Some(caps) = analyze_regex().captures(instruction) else {
        return (None, None);
    };
    (
        Some(clean_path(&caps[1])),
        Some(clean_path(&caps[2])),
    )
}

/// Trim whitespace and surrounding quote characters from a captured path.
fn clean_path(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '\'' || c == '"').to_string()
}
