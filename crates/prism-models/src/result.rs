//! Analysis result value objects.
//!
//! Results are produced by the service and rendered as-is; the client never
//! mutates them. A persisted result belongs to exactly one content ID.

use serde::{Deserialize, Serialize};

use crate::kind::AnalysisKind;

/// Condensed summary of a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// One-paragraph overview.
    pub overview: String,

    /// Key points, in source order.
    #[serde(default)]
    pub key_points: Vec<String>,

    /// Topics touched on.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// A rhetorical technique identified in the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhetoricalTechnique {
    pub name: String,
    pub description: String,

    /// Verbatim examples from the source.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Verification outcome for a single factual claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimCheck {
    pub claim: String,
    pub assessment: String,

    /// Service confidence in the assessment, 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Result of rhetorical analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhetoricalReport {
    /// Central thesis of the content, when one could be identified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesis: Option<String>,

    #[serde(default)]
    pub techniques: Vec<RhetoricalTechnique>,

    /// Claim checks, present only when verification was requested.
    #[serde(default)]
    pub claims: Vec<ClaimCheck>,
}

/// Severity of a manipulation tactic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

/// A manipulation tactic identified in the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulationTactic {
    pub name: String,
    pub severity: Severity,
    pub description: String,

    #[serde(default)]
    pub examples: Vec<String>,
}

/// Result of manipulation analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulationReport {
    /// Overall manipulation score, 0.0 (none) to 10.0.
    pub overall_score: f64,

    pub summary: String,

    #[serde(default)]
    pub tactics: Vec<ManipulationTactic>,
}

/// A cross-domain connection drawn by discovery analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainInsight {
    /// Domain the connection reaches into.
    pub domain: String,
    pub insight: String,
}

/// Result of discovery analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    #[serde(default)]
    pub insights: Vec<DomainInsight>,

    /// Synthesis across all insights, when the service produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<String>,
}

/// A single generated prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPrompt {
    pub category: String,
    pub text: String,
}

/// Result of prompt generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSet {
    #[serde(default)]
    pub prompts: Vec<GeneratedPrompt>,
}

/// Union over all analysis result kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Summary(Summary),
    Rhetorical(RhetoricalReport),
    Manipulation(ManipulationReport),
    Discovery(DiscoveryReport),
    Prompts(PromptSet),
}

impl AnalysisResult {
    /// The kind of analysis this result came from.
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisResult::Summary(_) => AnalysisKind::Summary,
            AnalysisResult::Rhetorical(_) => AnalysisKind::Rhetorical,
            AnalysisResult::Manipulation(_) => AnalysisKind::Manipulation,
            AnalysisResult::Discovery(_) => AnalysisKind::Discovery,
            AnalysisResult::Prompts(_) => AnalysisKind::Prompts,
        }
    }
}
