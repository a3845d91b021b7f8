//! Long-running analysis endpoints, one per kind.

use async_trait::async_trait;
use tracing::debug;

use prism_models::{
    AnalysisKind, DiscoveryReport, DiscoveryRequest, ManipulationReport, ManipulationRequest,
    PromptRequest, PromptSet, RhetoricalReport, RhetoricalRequest, Summary, SummaryRequest,
};

use crate::client::ApiClient;
use crate::error::Result;

/// One operation per analysis kind.
///
/// Each call maps to a single long-running request against the service; the
/// service reports no intermediate progress, so callers that want a progress
/// signal have to synthesize one.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> Result<Summary>;

    async fn analyze_rhetoric(&self, request: &RhetoricalRequest) -> Result<RhetoricalReport>;

    async fn analyze_manipulation(
        &self,
        request: &ManipulationRequest,
    ) -> Result<ManipulationReport>;

    async fn discover_connections(&self, request: &DiscoveryRequest) -> Result<DiscoveryReport>;

    async fn generate_prompts(&self, request: &PromptRequest) -> Result<PromptSet>;
}

impl ApiClient {
    fn analysis_path(kind: AnalysisKind) -> String {
        format!("/api/analysis/{}", kind.as_str())
    }
}

#[async_trait]
impl AnalysisApi for ApiClient {
    async fn summarize(&self, request: &SummaryRequest) -> Result<Summary> {
        debug!(content_id = ?request.source.content_id(), "requesting summary");
        self.post_json(&Self::analysis_path(AnalysisKind::Summary), request)
            .await
    }

    async fn analyze_rhetoric(&self, request: &RhetoricalRequest) -> Result<RhetoricalReport> {
        debug!(
            verify_claims = request.options.verify_claims,
            "requesting rhetorical analysis"
        );
        self.post_json(&Self::analysis_path(AnalysisKind::Rhetorical), request)
            .await
    }

    async fn analyze_manipulation(
        &self,
        request: &ManipulationRequest,
    ) -> Result<ManipulationReport> {
        debug!(mode = ?request.options.mode, "requesting manipulation analysis");
        self.post_json(&Self::analysis_path(AnalysisKind::Manipulation), request)
            .await
    }

    async fn discover_connections(&self, request: &DiscoveryRequest) -> Result<DiscoveryReport> {
        self.post_json(&Self::analysis_path(AnalysisKind::Discovery), request)
            .await
    }

    async fn generate_prompts(&self, request: &PromptRequest) -> Result<PromptSet> {
        self.post_json(&Self::analysis_path(AnalysisKind::Prompts), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_models::{AnalysisSource, Transcript};

    #[test]
    fn test_analysis_paths() {
        assert_eq!(
            ApiClient::analysis_path(AnalysisKind::Manipulation),
            "/api/analysis/manipulation"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = SummaryRequest::new(AnalysisSource::transcript(Transcript::from_text(
            "some text to summarize",
        )));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["source"], "transcript");
        assert_eq!(json["transcript"]["text"], "some text to summarize");
        assert!(json.get("content_id").is_none());
    }
}
