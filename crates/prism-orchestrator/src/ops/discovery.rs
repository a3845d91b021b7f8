//! Discovery analysis.

use std::sync::Arc;

use async_trait::async_trait;

use prism_client::{AnalysisApi, AnalysisCache};
use prism_models::{AnalysisKind, ContentId, DiscoveryReport, DiscoveryRequest};

use crate::controller::{AnalysisController, AnalysisOperation};
use crate::progress::{ProgressPlan, DISCOVERY_PHASES, DISCOVERY_TICK};

/// Discovery analysis wired to the service.
pub struct DiscoveryOperation {
    api: Arc<dyn AnalysisApi>,
    cache: Arc<dyn AnalysisCache>,
}

impl DiscoveryOperation {
    pub fn new(api: Arc<dyn AnalysisApi>, cache: Arc<dyn AnalysisCache>) -> Self {
        Self { api, cache }
    }

    /// Convenience constructor for a ready-to-use controller.
    pub fn controller(
        api: Arc<dyn AnalysisApi>,
        cache: Arc<dyn AnalysisCache>,
    ) -> AnalysisController<Self> {
        AnalysisController::new(Self::new(api, cache))
    }
}

#[async_trait]
impl AnalysisOperation for DiscoveryOperation {
    type Request = DiscoveryRequest;
    type Output = DiscoveryReport;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Discovery
    }

    fn plan(&self, _request: &DiscoveryRequest) -> ProgressPlan {
        ProgressPlan::Walk {
            phases: &DISCOVERY_PHASES,
            tick: DISCOVERY_TICK,
        }
    }

    fn cache_key(&self, request: &DiscoveryRequest) -> Option<ContentId> {
        request.source.content_id().cloned()
    }

    async fn execute(&self, request: &DiscoveryRequest) -> prism_client::Result<DiscoveryReport> {
        self.api.discover_connections(request).await
    }

    async fn write_cache(
        &self,
        content_id: &ContentId,
        output: &DiscoveryReport,
    ) -> prism_client::Result<()> {
        self.cache.save_discovery(content_id, output).await
    }
}
