//! Analysis requests and per-kind options.

use serde::{Deserialize, Serialize};

use crate::ids::ContentId;
use crate::transcript::Transcript;

/// What an analysis should operate on.
///
/// Either an inline transcript (optionally tagged with a known backend
/// identity so results can be written back to the cache) or a content ID
/// alone, in which case the service looks up its own cached transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Inline transcript text and segments.
    Transcript {
        transcript: Transcript,
        /// Backend identity of the content, when known. Enables cache writes
        /// for results computed from this transcript.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_id: Option<ContentId>,
    },
    /// Server-side lookup of a previously ingested transcript.
    Cached { content_id: ContentId },
}

impl AnalysisSource {
    /// Creates a source from an inline transcript with no backend identity.
    pub fn transcript(transcript: Transcript) -> Self {
        Self::Transcript {
            transcript,
            content_id: None,
        }
    }

    /// Creates a source from an inline transcript tagged with a content ID.
    pub fn transcript_for(transcript: Transcript, content_id: ContentId) -> Self {
        Self::Transcript {
            transcript,
            content_id: Some(content_id),
        }
    }

    /// Creates a source that resolves server-side from a content ID.
    pub fn cached(content_id: ContentId) -> Self {
        Self::Cached { content_id }
    }

    /// The content ID attached to this source, if any.
    pub fn content_id(&self) -> Option<&ContentId> {
        match self {
            AnalysisSource::Transcript { content_id, .. } => content_id.as_ref(),
            AnalysisSource::Cached { content_id } => Some(content_id),
        }
    }

    /// The inline transcript, if this source carries one.
    pub fn transcript_text(&self) -> Option<&Transcript> {
        match self {
            AnalysisSource::Transcript { transcript, .. } => Some(transcript),
            AnalysisSource::Cached { .. } => None,
        }
    }
}

/// Requested summary length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLength {
    Brief,
    #[default]
    Standard,
    Detailed,
}

/// Options for summary analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    #[serde(default)]
    pub length: SummaryLength,
}

/// Options for rhetorical analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RhetoricalOptions {
    /// Whether factual claims should be cross-checked.
    #[serde(default)]
    pub verify_claims: bool,

    /// Analysis sections to include; empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analysis_types: Vec<String>,
}

/// Depth of a manipulation analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Single-pass scan, answers in seconds.
    Quick,
    /// Multi-pass analysis, takes a minute or more.
    #[default]
    Deep,
}

/// Options for manipulation analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManipulationOptions {
    #[serde(default)]
    pub mode: AnalysisMode,
}

/// Options for discovery analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    /// Domains to prioritize when drawing cross-domain connections; empty
    /// lets the service choose.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub focus_domains: Vec<String>,
}

/// Options for prompt generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptOptions {
    /// Target prompt categories; empty lets the service choose.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

macro_rules! define_request {
    ($(#[$meta:meta])* $name:ident, $options:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(flatten)]
            pub source: AnalysisSource,

            #[serde(default)]
            pub options: $options,
        }

        impl $name {
            /// Creates a request with default options.
            pub fn new(source: AnalysisSource) -> Self {
                Self {
                    source,
                    options: Default::default(),
                }
            }

            /// Sets the options.
            pub fn with_options(mut self, options: $options) -> Self {
                self.options = options;
                self
            }
        }
    };
}

define_request!(
    /// Request for a summary.
    SummaryRequest,
    SummaryOptions
);
define_request!(
    /// Request for rhetorical analysis.
    RhetoricalRequest,
    RhetoricalOptions
);
define_request!(
    /// Request for manipulation analysis.
    ManipulationRequest,
    ManipulationOptions
);
define_request!(
    /// Request for discovery analysis.
    DiscoveryRequest,
    DiscoveryOptions
);
define_request!(
    /// Request for prompt generation.
    PromptRequest,
    PromptOptions
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_content_id() {
        let inline = AnalysisSource::transcript(Transcript::from_text("hello"));
        assert!(inline.content_id().is_none());

        let tagged = AnalysisSource::transcript_for(
            Transcript::from_text("hello"),
            ContentId::from_string("vid-1"),
        );
        assert_eq!(tagged.content_id().unwrap().as_str(), "vid-1");

        let cached = AnalysisSource::cached(ContentId::from_string("vid-2"));
        assert_eq!(cached.content_id().unwrap().as_str(), "vid-2");
        assert!(cached.transcript_text().is_none());
    }

    #[test]
    fn test_request_serialization_flattens_source() {
        let request = ManipulationRequest::new(AnalysisSource::cached(ContentId::from_string(
            "vid-9",
        )))
        .with_options(ManipulationOptions {
            mode: AnalysisMode::Quick,
        });

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["source"], "cached");
        assert_eq!(json["content_id"], "vid-9");
        assert_eq!(json["options"]["mode"], "quick");
    }

    #[test]
    fn test_mode_defaults_to_deep() {
        assert_eq!(ManipulationOptions::default().mode, AnalysisMode::Deep);
    }
}
