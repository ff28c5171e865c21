//! Response Text Extraction
//!
//! Normalizes a heterogeneous [`AgentResponse`] into a single text string.
//! Extraction is total: every access failure counts as "candidate absent"
//! and falls through to the next, ending at the empty string. The caller
//! decides whether an empty result means "try the fallback path".

use super::backend::AgentResponse;

/// Extract the primary text payload from a response.
///
/// Priority order:
/// 1. plain text
/// 2. direct `content` field
/// 3. `output_text` field
/// 4. the last exchange turn's content
/// 5. empty string
///
/// Whitespace-only candidates are treated as absent.
pub fn extract_text(response: &AgentResponse) -> String {
    match response {
        AgentResponse::Text(text) => text.trim().to_string(),
        AgentResponse::Structured(out) => {
            if let Some(content) = non_empty(out.content.as_deref()) {
                return content;
            }
            if let Some(text) = non_empty(out.output_text.as_deref()) {
                return text;
            }
            if let Some(last) = out.turns.last() {
                if let Some(content) = non_empty(last.content.as_deref()) {
                    return content;
                }
            }
            String::new()
        }
    }
}

fn non_empty(candidate: Option<&str>) -> Option<String> {
    candidate
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::backend::{ExchangeTurn, StructuredOutput};

    fn turn(content: Option<&str>) -> ExchangeTurn {
        ExchangeTurn {
            role: "assistant".to_string(),
            content: content.map(ToString::to_string),
        }
    }

    #[test]
    fn test_plain_text_trimmed() {
        let resp = AgentResponse::Text("  report body \n".to_string());
        assert_eq!(extract_text(&resp), "report body");
    }

    #[test]
    fn test_direct_content_beats_last_turn() {
        // Both access points populated — the direct field must win.
        let resp = AgentResponse::Structured(StructuredOutput {
            content: Some("direct".to_string()),
            output_text: None,
            turns: vec![turn(Some("from turn"))],
        });
        assert_eq!(extract_text(&resp), "direct");
    }

    #[test]
    fn test_output_text_beats_turns() {
        let resp = AgentResponse::Structured(StructuredOutput {
            content: None,
            output_text: Some("alt text".to_string()),
            turns: vec![turn(Some("from turn"))],
        });
        assert_eq!(extract_text(&resp), "alt text");
    }

    #[test]
    fn test_last_turn_content_is_authoritative() {
        let resp = AgentResponse::Structured(StructuredOutput {
            content: None,
            output_text: None,
            turns: vec![turn(Some("first")), turn(Some("last"))],
        });
        assert_eq!(extract_text(&resp), "last");
    }

    #[test]
    fn test_whitespace_candidate_falls_through() {
        let resp = AgentResponse::Structured(StructuredOutput {
            content: Some("   ".to_string()),
            output_text: Some("usable".to_string()),
            turns: Vec::new(),
        });
        assert_eq!(extract_text(&resp), "usable");
    }

    #[test]
    fn test_last_turn_without_content_yields_empty() {
        // The last turn is authoritative even when empty — earlier turns
        // are not consulted.
        let resp = AgentResponse::Structured(StructuredOutput {
            content: None,
            output_text: None,
            turns: vec![turn(Some("earlier")), turn(None)],
        });
        assert_eq!(extract_text(&resp), "");
    }

    #[test]
    fn test_fully_empty_response_yields_empty_string() {
        assert_eq!(extract_text(&AgentResponse::empty()), "");
    }
}
