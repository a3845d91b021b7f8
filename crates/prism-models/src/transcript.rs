//! Transcript types.

use serde::{Deserialize, Serialize};

/// A single timed segment of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start, in seconds from the beginning of the content.
    pub start: f64,
    /// Segment end, in seconds.
    pub end: f64,
    /// Text spoken or written within the segment.
    pub text: String,
}

/// Full transcript text plus its structured timed segments.
///
/// Pasted text and extracted articles have no timing information, so
/// `segments` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcript text.
    pub text: String,

    /// Timed segments, empty for untimed sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Creates a transcript from plain text with no timing information.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            segments: Vec::new(),
        }
    }

    /// Creates a transcript with timed segments.
    pub fn with_segments(text: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            text: text.into(),
            segments,
        }
    }

    /// Number of whitespace-separated words in the transcript text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        let t = Transcript::from_text("one two  three\nfour");
        assert_eq!(t.word_count(), 4);

        let empty = Transcript::from_text("   ");
        assert_eq!(empty.word_count(), 0);
    }

    #[test]
    fn test_segments_skipped_when_empty() {
        let t = Transcript::from_text("hello world");
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("segments"));

        let t = Transcript::with_segments(
            "hello",
            vec![TranscriptSegment {
                start: 0.0,
                end: 1.5,
                text: "hello".to_string(),
            }],
        );
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("segments"));
    }
}
