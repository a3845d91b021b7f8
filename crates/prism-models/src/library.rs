//! Library projection of ingested content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ContentId;
use crate::kind::AnalysisKind;

/// Where a piece of content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Video,
    Article,
    Document,
    Text,
}

/// Read-only summary projection of persisted content, used for listing.
///
/// Owned entirely by the backend; the client never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryItem {
    pub content_id: ContentId,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    pub source_type: SourceType,

    #[serde(default)]
    pub has_summary: bool,
    #[serde(default)]
    pub has_rhetorical: bool,
    #[serde(default)]
    pub has_manipulation: bool,
    #[serde(default)]
    pub has_discovery: bool,
    #[serde(default)]
    pub has_prompts: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
}

impl LibraryItem {
    /// Whether a persisted result exists for the given analysis kind.
    pub fn has_analysis(&self, kind: AnalysisKind) -> bool {
        match kind {
            AnalysisKind::Summary => self.has_summary,
            AnalysisKind::Rhetorical => self.has_rhetorical,
            AnalysisKind::Manipulation => self.has_manipulation,
            AnalysisKind::Discovery => self.has_discovery,
            AnalysisKind::Prompts => self.has_prompts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_analysis_flags() {
        let json = r#"{
            "content_id": "vid-1",
            "title": "A lecture",
            "source_type": "video",
            "has_summary": true,
            "created_at": "2026-05-01T12:00:00Z"
        }"#;

        let item: LibraryItem = serde_json::from_str(json).unwrap();
        assert!(item.has_analysis(AnalysisKind::Summary));
        assert!(!item.has_analysis(AnalysisKind::Discovery));
        assert!(item.tags.is_empty());
    }
}
