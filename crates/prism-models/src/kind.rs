//! Analysis kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A distinct backend analysis capability with its own request and result
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Condensed summary of the content.
    Summary,
    /// Rhetorical technique analysis, optionally with claim verification.
    Rhetorical,
    /// Manipulation tactic analysis.
    Manipulation,
    /// Cross-domain discovery insights.
    Discovery,
    /// Generated prompts derived from the content.
    Prompts,
}

impl AnalysisKind {
    /// All kinds, in display order.
    pub const ALL: [AnalysisKind; 5] = [
        AnalysisKind::Summary,
        AnalysisKind::Rhetorical,
        AnalysisKind::Manipulation,
        AnalysisKind::Discovery,
        AnalysisKind::Prompts,
    ];

    /// Stable wire name, used as the path segment in analysis and cache
    /// endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Summary => "summary",
            AnalysisKind::Rhetorical => "rhetorical",
            AnalysisKind::Manipulation => "manipulation",
            AnalysisKind::Discovery => "discovery",
            AnalysisKind::Prompts => "prompts",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(AnalysisKind::Summary.as_str(), "summary");
        assert_eq!(AnalysisKind::Prompts.as_str(), "prompts");

        let json = serde_json::to_string(&AnalysisKind::Rhetorical).unwrap();
        assert_eq!(json, "\"rhetorical\"");
    }

    #[test]
    fn test_all_contains_every_kind() {
        assert_eq!(AnalysisKind::ALL.len(), 5);
    }
}
