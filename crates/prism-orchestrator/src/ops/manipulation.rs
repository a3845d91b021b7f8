//! Manipulation analysis.

use std::sync::Arc;

use async_trait::async_trait;

use prism_client::{AnalysisApi, AnalysisCache};
use prism_models::{
    AnalysisKind, AnalysisMode, ContentId, ManipulationReport, ManipulationRequest,
};

use crate::controller::{AnalysisController, AnalysisOperation};
use crate::progress::{
    ProgressPlan, MANIPULATION_DEEP_PHASES, MANIPULATION_DEEP_TICK, QUICK_SCAN_PHASE,
};

/// Manipulation analysis wired to the service.
///
/// Deep mode walks the full five-phase table on a slow tick; quick mode pins
/// a single mid-point value since the call answers in seconds.
pub struct ManipulationOperation {
    api: Arc<dyn AnalysisApi>,
    cache: Arc<dyn AnalysisCache>,
}

impl ManipulationOperation {
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
impl AnalysisOperation for ManipulationOperation {
    type Request = ManipulationRequest;
    type Output = ManipulationReport;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Manipulation
    }

    fn plan(&self, request: &ManipulationRequest) -> ProgressPlan {
        match request.options.mode {
            AnalysisMode::Deep => ProgressPlan::Walk {
                phases: &MANIPULATION_DEEP_PHASES,
                tick: MANIPULATION_DEEP_TICK,
            },
            AnalysisMode::Quick => ProgressPlan::Fixed {
                phase: QUICK_SCAN_PHASE,
            },
        }
    }

    fn cache_key(&self, request: &ManipulationRequest) -> Option<ContentId> {
        request.source.content_id().cloned()
    }

    async fn execute(
        &self,
        request: &ManipulationRequest,
    ) -> prism_client::Result<ManipulationReport> {
        self.api.analyze_manipulation(request).await
    }

    async fn write_cache(
        &self,
        content_id: &ContentId,
        output: &ManipulationReport,
    ) -> prism_client::Result<()> {
        self.cache.save_manipulation(content_id, output).await
    }
}
