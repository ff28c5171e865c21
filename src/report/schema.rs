//! Structured Report Schemas
//!
//! The agents are instructed to answer with a JSON document matching one
//! of four fixed schemas. These types exist so callers that need machine-
//! readable output can parse model text without re-deriving field names,
//! and so tests can pin the contract.
//!
//! Model output frequently arrives wrapped in Markdown code fences;
//! [`clean_json_block`] strips those before parsing.

use serde::{Deserialize, Serialize};

// ============================================================================
// Quality
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityViolation {
    pub parameter: String,
    pub measured_value: f64,
    pub expected_range: String,
    pub deviation: String,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityBatchReport {
    pub batch_id: String,
    pub status: String,
    #[serde(default)]
    pub violations: Vec<QualityViolation>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityExplanation {
    pub global_diagnosis: String,
    #[serde(default)]
    pub possible_causes: Vec<String>,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityRecommendation {
    pub immediate_action: String,
    pub preventive_action: String,
    pub urgency: String,
}

/// Quality agent JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    #[serde(default)]
    pub batch_reports: Vec<QualityBatchReport>,
    pub overall_summary: String,
    pub explanation: QualityExplanation,
    pub recommendation: QualityRecommendation,
}

// ============================================================================
// Process
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRecommendation {
    pub condition: String,
    pub advice: String,
    pub priority: String,
    pub explanation: String,
    pub impact_assessment: String,
}

/// Process agent JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    #[serde(default)]
    pub recommendations: Vec<ProcessRecommendation>,
    pub summary: String,
    pub global_diagnosis: String,
}

// ============================================================================
// Maintenance
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceIssue {
    pub symptom: String,
    pub root_cause: String,
    pub action: String,
    pub impact_assessment: String,
    pub recommended_timeframe: String,
    pub confidence: f64,
}

/// Maintenance agent JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceReport {
    #[serde(default)]
    pub issues_detected: Vec<MaintenanceIssue>,
    pub maintenance_priority: String,
    pub summary: String,
    pub global_diagnosis: String,
}

// ============================================================================
// Eco
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcoBatchReport {
    pub batch_id: String,
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    pub verdict: String,
    pub explanation: String,
    pub recommendation: String,
}

/// Eco agent JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcoReport {
    #[serde(default)]
    pub batch_reports: Vec<EcoBatchReport>,
    pub eco_compliance_rate: String,
    pub total_emissions_estimate: String,
    pub summary: String,
    pub global_diagnosis: String,
}

// ============================================================================
// Fence stripping
// ============================================================================

/// Strip Markdown code fences (```json ... ``` or bare ```) from model
/// output and trim the remainder. Returns the inner text unchanged when
/// no fences are present.
pub fn clean_json_block(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_block_strips_fences() {
        let fenced = "```json\n{\"summary\": \"ok\"}\n```";
        assert_eq!(clean_json_block(fenced), "{\"summary\": \"ok\"}");
    }

    #[test]
    fn test_clean_json_block_passthrough() {
        assert_eq!(clean_json_block("  plain  "), "plain");
    }

    #[test]
    fn test_quality_schema_round_trip() {
        let json = r#"{
            "batch_reports": [{
                "batch_id": "32",
                "status": "Non-compliant",
                "violations": [{
                    "parameter": "Humidity",
                    "measured_value": 11.3,
                    "expected_range": "9.0 - 11.0",
                    "deviation": "+0.3",
                    "comment": "slightly above tolerance"
                }],
                "summary": "Batch 32 exceeds humidity tolerance"
            }],
            "overall_summary": "1 of 4 batches non-compliant.",
            "explanation": {
                "global_diagnosis": "Only batch 32 shows issues.",
                "possible_causes": ["humidity sensor drift"],
                "impact": "Minor."
            },
            "recommendation": {
                "immediate_action": "Recalibrate humidity sensor.",
                "preventive_action": "Review supplier consistency.",
                "urgency": "Medium"
            }
        }"#;

        let report: QualityReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.batch_reports.len(), 1);
        assert_eq!(report.batch_reports[0].violations[0].measured_value, 11.3);
        assert_eq!(report.recommendation.urgency, "Medium");
    }

    #[test]
    fn test_maintenance_schema_parses_empty_issue_list() {
        let json = r#"{
            "issues_detected": [],
            "maintenance_priority": "None",
            "summary": "No anomalies detected. System operating normally.",
            "global_diagnosis": "All monitored sensors stable."
        }"#;

        let report: MaintenanceReport = serde_json::from_str(json).unwrap();
        assert!(report.issues_detected.is_empty());
        assert_eq!(report.maintenance_priority, "None");
    }

    #[test]
    fn test_eco_schema_from_fenced_output() {
        let fenced = r#"```json
        {
            "batch_reports": [],
            "eco_compliance_rate": "75%",
            "total_emissions_estimate": "4.2 kg CO2e per batch",
            "summary": "Overall performance improving.",
            "global_diagnosis": "Energy slightly above target."
        }
        ```"#;

        let report: EcoReport = serde_json::from_str(&clean_json_block(fenced)).unwrap();
        assert_eq!(report.eco_compliance_rate, "75%");
    }
}
