//! Playlist and bulk transcript endpoints.

use serde::{Deserialize, Serialize};
use tracing::debug;

use prism_models::{ContentId, Transcript};

use crate::client::ApiClient;
use crate::error::Result;

/// A single video in a playlist listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistVideo {
    pub video_id: ContentId,
    pub title: String,

    /// Duration in seconds, when the service knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Transcript fetched for one video of a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoTranscript {
    pub video_id: ContentId,

    /// Missing when the video has no transcript available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
}

#[derive(Debug, Serialize)]
struct PlaylistBody<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct BulkTranscriptBody<'a> {
    video_ids: &'a [ContentId],
}

impl ApiClient {
    /// Lists the videos of a playlist URL.
    pub async fn playlist_videos(&self, url: &str) -> Result<Vec<PlaylistVideo>> {
        debug!(url, "listing playlist");
        self.post_json("/api/playlist/videos", &PlaylistBody { url })
            .await
    }

    /// Fetches transcripts for a list of video IDs.
    ///
    /// Videos without transcripts come back with `transcript: None` rather
    /// than failing the whole batch.
    pub async fn bulk_transcripts(&self, video_ids: &[ContentId]) -> Result<Vec<VideoTranscript>> {
        debug!(count = video_ids.len(), "fetching transcripts");
        self.post_json("/api/playlist/transcripts", &BulkTranscriptBody { video_ids })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_response_with_missing_transcript() {
        let json = r#"[
            {"video_id": "v1", "transcript": {"text": "hello"}},
            {"video_id": "v2"}
        ]"#;

        let transcripts: Vec<VideoTranscript> = serde_json::from_str(json).unwrap();
        assert_eq!(transcripts.len(), 2);
        assert!(transcripts[0].transcript.is_some());
        assert!(transcripts[1].transcript.is_none());
    }
}
