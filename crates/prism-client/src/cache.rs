//! Per-kind cache endpoints.
//!
//! The service caches analysis results keyed by content ID. A fetch miss is
//! a normal outcome (`Ok(None)`), not an error; saves are expected to be
//! best-effort from the caller's side.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use prism_models::{
    AnalysisKind, ContentId, DiscoveryReport, ManipulationReport, PromptSet, RhetoricalReport,
    Summary,
};

use crate::client::ApiClient;
use crate::error::{ClientError, Result};

/// Save/fetch per analysis kind against the service's cache store.
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    async fn fetch_summary(&self, content_id: &ContentId) -> Result<Option<Summary>>;
    async fn save_summary(&self, content_id: &ContentId, result: &Summary) -> Result<()>;

    async fn fetch_rhetorical(&self, content_id: &ContentId) -> Result<Option<RhetoricalReport>>;
    async fn save_rhetorical(
        &self,
        content_id: &ContentId,
        result: &RhetoricalReport,
    ) -> Result<()>;

    async fn fetch_manipulation(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<ManipulationReport>>;
    async fn save_manipulation(
        &self,
        content_id: &ContentId,
        result: &ManipulationReport,
    ) -> Result<()>;

    async fn fetch_discovery(&self, content_id: &ContentId) -> Result<Option<DiscoveryReport>>;
    async fn save_discovery(&self, content_id: &ContentId, result: &DiscoveryReport)
        -> Result<()>;

    async fn fetch_prompts(&self, content_id: &ContentId) -> Result<Option<PromptSet>>;
    async fn save_prompts(&self, content_id: &ContentId, result: &PromptSet) -> Result<()>;
}

impl ApiClient {
    fn cache_path(kind: AnalysisKind, content_id: &ContentId) -> String {
        format!("/api/cache/{}/{}", kind.as_str(), content_id)
    }

    async fn fetch_cached<T: DeserializeOwned>(
        &self,
        kind: AnalysisKind,
        content_id: &ContentId,
    ) -> Result<Option<T>> {
        match self.get_json(&Self::cache_path(kind, content_id)).await {
            Ok(value) => {
                trace!(%kind, %content_id, "cache hit");
                Ok(Some(value))
            }
            Err(ClientError::Api { status: 404, .. }) => {
                trace!(%kind, %content_id, "cache miss");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn save_cached<T: Serialize + Sync>(
        &self,
        kind: AnalysisKind,
        content_id: &ContentId,
        result: &T,
    ) -> Result<()> {
        self.post_json_no_content(&Self::cache_path(kind, content_id), result)
            .await
    }
}

#[async_trait]
impl AnalysisCache for ApiClient {
    async fn fetch_summary(&self, content_id: &ContentId) -> Result<Option<Summary>> {
        self.fetch_cached(AnalysisKind::Summary, content_id).await
    }

    async fn save_summary(&self, content_id: &ContentId, result: &Summary) -> Result<()> {
        self.save_cached(AnalysisKind::Summary, content_id, result)
            .await
    }

    async fn fetch_rhetorical(&self, content_id: &ContentId) -> Result<Option<RhetoricalReport>> {
        self.fetch_cached(AnalysisKind::Rhetorical, content_id)
            .await
    }

    async fn save_rhetorical(
        &self,
        content_id: &ContentId,
        result: &RhetoricalReport,
    ) -> Result<()> {
        self.save_cached(AnalysisKind::Rhetorical, content_id, result)
            .await
    }

    async fn fetch_manipulation(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<ManipulationReport>> {
        self.fetch_cached(AnalysisKind::Manipulation, content_id)
            .await
    }

    async fn save_manipulation(
        &self,
        content_id: &ContentId,
        result: &ManipulationReport,
    ) -> Result<()> {
        self.save_cached(AnalysisKind::Manipulation, content_id, result)
            .await
    }

    async fn fetch_discovery(&self, content_id: &ContentId) -> Result<Option<DiscoveryReport>> {
        self.fetch_cached(AnalysisKind::Discovery, content_id).await
    }

    async fn save_discovery(
        &self,
        content_id: &ContentId,
        result: &DiscoveryReport,
    ) -> Result<()> {
        self.save_cached(AnalysisKind::Discovery, content_id, result)
            .await
    }

    async fn fetch_prompts(&self, content_id: &ContentId) -> Result<Option<PromptSet>> {
        self.fetch_cached(AnalysisKind::Prompts, content_id).await
    }

    async fn save_prompts(&self, content_id: &ContentId, result: &PromptSet) -> Result<()> {
        self.save_cached(AnalysisKind::Prompts, content_id, result)
            .await
    }
}
