//! Domain Agents
//!
//! Four specialized diagnostic agents, each pairing a reasoning prompt with
//! a declared toolset and a default data/rules file pair:
//!
//! 1. **Quality** — tolerance deviations in humidity / density / thickness
//! 2. **Process** — line speed / temperature / density stability advice
//! 3. **Maintenance** — equipment log fault analysis
//! 4. **Eco** — per-batch energy / waste / CO₂ target compliance
//!
//! The reasoning capability itself is opaque (see [`backend`]); this module
//! only describes *what* each agent asks of it.

pub mod backend;
pub mod invoker;
pub mod response;

pub use backend::{AgentResponse, BackendError, ExchangeTurn, ReasoningBackend, StructuredOutput};
pub use invoker::{invoke, InvokeError};
pub use response::extract_text;

use std::fmt;
use std::str::FromStr;

/// Named tool capabilities an agent declares to the reasoning backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCapability {
    /// Resolve and parse named rules/target YAML files.
    RuleLoading,
    /// Directional deviation description against tolerance bounds.
    DeviationDescription,
    /// Least-squares trend labeling of numeric columns.
    TrendLabeling,
    /// Z-score outlier detection.
    OutlierDetection,
    /// Generic file reading.
    FileAccess,
    /// Tabular data handling.
    Tabular,
    /// Free-form reasoning scratchpad.
    Reasoning,
    /// Arithmetic helpers.
    Calculation,
}

impl ToolCapability {
    pub fn name(self) -> &'static str {
        match self {
            Self::RuleLoading => "rules",
            Self::DeviationDescription => "deviation",
            Self::TrendLabeling => "trend",
            Self::OutlierDetection => "outliers",
            Self::FileAccess => "files",
            Self::Tabular => "tabular",
            Self::Reasoning => "reasoning",
            Self::Calculation => "calculator",
        }
    }
}

/// The four domain agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Quality,
    Process,
    Maintenance,
    Eco,
}

impl AgentKind {
    pub const ALL: [Self; 4] = [Self::Quality, Self::Process, Self::Maintenance, Self::Eco];

    /// URL/CLI identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Process => "process",
            Self::Maintenance => "maintenance",
            Self::Eco => "eco",
        }
    }

    /// Static profile: prompt material, toolset, default files.
    pub fn profile(self) -> &'static AgentProfile {
        match self {
            Self::Quality => &QUALITY_PROFILE,
            Self::Process => &PROCESS_PROFILE,
            Self::Maintenance => &MAINTENANCE_PROFILE,
            Self::Eco => &ECO_PROFILE,
        }
    }

    /// Whether a deterministic local fallback report exists for this agent.
    pub fn has_local_fallback(self) -> bool {
        matches!(self, Self::Quality)
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().display_name)
    }
}

/// Error for unrecognized agent identifiers.
#[derive(Debug, thiserror::Error)]
#[error("unknown agent '{0}'")]
pub struct UnknownAgent(pub String);

impl FromStr for AgentKind {
    type Err = UnknownAgent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "process" => Ok(Self::Process),
            "maintenance" => Ok(Self::Maintenance),
            "eco" => Ok(Self::Eco),
            other => Err(UnknownAgent(other.to_string())),
        }
    }
}

/// Static description of one agent.
#[derive(Debug)]
pub struct AgentProfile {
    pub display_name: &'static str,
    pub role: &'static str,
    /// Instruction text sent ahead of the user command.
    pub instructions: &'static str,
    pub toolset: &'static [ToolCapability],
    /// Rules/target filename resolved via the knowledge-base search path.
    pub default_rules_file: &'static str,
    /// Default source filename under the data (or logs) directory.
    pub default_source_file: &'static str,
    /// Whether the default source lives under the logs directory.
    pub source_from_logs: bool,
}

static QUALITY_PROFILE: AgentProfile = AgentProfile {
    display_name: "Quality Reasoner Agent",
    role: "Analyze product quality measurements and detect deviations from tolerance rules.",
    instructions: "Read the measurement table (humidity, density, thickness), compare each \
value against the tolerance ranges in quality_rules.yaml, and report every non-compliant \
parameter with its measured value, expected range, signed deviation, and a short comment. \
Close with a global diagnosis, possible causes, impact, and corrective/preventive \
recommendations with an urgency level. Answer as a single JSON document matching the \
quality report schema.",
    toolset: &[
        ToolCapability::RuleLoading,
        ToolCapability::DeviationDescription,
        ToolCapability::FileAccess,
        ToolCapability::Tabular,
        ToolCapability::Reasoning,
        ToolCapability::Calculation,
    ],
    default_rules_file: "quality_rules.yaml",
    default_source_file: "quality.csv",
    source_from_logs: false,
};

static PROCESS_PROFILE: AgentProfile = AgentProfile {
    display_name: "Process Advisor Agent",
    role: "Advise on production process stability from line speed, temperature, and density.",
    instructions: "Evaluate the process metrics row by row against the conditions in \
process_rules.yaml. For each violated or approached threshold produce the triggering \
condition, the recommended action, a priority (Low/Medium/High), the reasoning, and an \
impact assessment. Summarize overall process health. If everything is stable, return an \
empty recommendation list with the summary 'All parameters stable. No adjustments \
needed.' Answer as a single JSON document matching the process report schema.",
    toolset: &[
        ToolCapability::RuleLoading,
        ToolCapability::TrendLabeling,
        ToolCapability::FileAccess,
        ToolCapability::Tabular,
        ToolCapability::Reasoning,
        ToolCapability::Calculation,
    ],
    default_rules_file: "process_rules.yaml",
    default_source_file: "process.csv",
    source_from_logs: false,
};

static MAINTENANCE_PROFILE: AgentProfile = AgentProfile {
    display_name: "Maintenance Advisor Agent",
    role: "Detect equipment faults in system logs and recommend maintenance actions.",
    instructions: "Match the log against the known error patterns in \
maintenance_rules.yaml, judge whether each fault is recurrent or isolated, infer a root \
cause, and recommend an action with an impact assessment, a timeframe, and a confidence \
value. Derive an overall maintenance priority (None/Low/Medium/High). If nothing is \
found, report an empty issue list with priority None. Answer as a single JSON document \
matching the maintenance report schema.",
    toolset: &[
        ToolCapability::RuleLoading,
        ToolCapability::FileAccess,
        ToolCapability::Reasoning,
    ],
    default_rules_file: "maintenance_rules.yaml",
    default_source_file: "system.log",
    source_from_logs: true,
};

static ECO_PROFILE: AgentProfile = AgentProfile {
    display_name: "Eco Insight Agent",
    role: "Evaluate sustainability performance of production batches.",
    instructions: "Score each batch (0-100) against the thresholds in eco_targets.yaml \
using energy_kwh, waste_kg, and co2_kg. Assign a verdict of Compliant, Partial, or \
Non-compliant, list the offending metrics, and recommend realistic improvements. Compute \
the global compliance rate and, when CO₂ data exists, a total emissions estimate. Answer \
as a single JSON document matching the eco report schema.",
    toolset: &[
        ToolCapability::RuleLoading,
        ToolCapability::DeviationDescription,
        ToolCapability::OutlierDetection,
        ToolCapability::FileAccess,
        ToolCapability::Tabular,
        ToolCapability::Reasoning,
        ToolCapability::Calculation,
    ],
    default_rules_file: "eco_targets.yaml",
    default_source_file: "eco.csv",
    source_from_logs: false,
};

/// Full prompt for one agent run: role, instructions, then the command.
pub fn compose_prompt(kind: AgentKind, instruction: &str) -> String {
    let profile = kind.profile();
    format!(
        "{role}\n\n{instructions}\n\n{instruction}",
        role = profile.role,
        instructions = profile.instructions,
    )
}
