//! Rhetorical analysis.

use std::sync::Arc;

use async_trait::async_trait;

use prism_client::{AnalysisApi, AnalysisCache};
use prism_models::{AnalysisKind, ContentId, RhetoricalReport, RhetoricalRequest};

use crate::controller::{AnalysisController, AnalysisOperation};
use crate::progress::{ProgressPlan, RHETORICAL_PHASES, RHETORICAL_TICK};

/// Rhetorical analysis wired to the service.
pub struct RhetoricalOperation {
    api: Arc<dyn AnalysisApi>,
    cache: Arc<dyn AnalysisCache>,
}

impl RhetoricalOperation {
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
impl AnalysisOperation for RhetoricalOperation {
    type Request = RhetoricalRequest;
    type Output = RhetoricalReport;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Rhetorical
    }

    fn plan(&self, _request: &RhetoricalRequest) -> ProgressPlan {
        ProgressPlan::Walk {
            phases: &RHETORICAL_PHASES,
            tick: RHETORICAL_TICK,
        }
    }

    fn cache_key(&self, request: &RhetoricalRequest) -> Option<ContentId> {
        request.source.content_id().cloned()
    }

    async fn execute(&self, request: &RhetoricalRequest) -> prism_client::Result<RhetoricalReport> {
        self.api.analyze_rhetoric(request).await
    }

    async fn write_cache(
        &self,
        content_id: &ContentId,
        output: &RhetoricalReport,
    ) -> prism_client::Result<()> {
        self.cache.save_rhetorical(content_id, output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingCache, ScriptedApi};
    use prism_models::{AnalysisSource, ContentId};

    #[tokio::test]
    async fn test_run_with_claim_verification() {
        let api = Arc::new(ScriptedApi::new());
        api.push_rhetorical(Ok(RhetoricalReport {
            thesis: None,
            techniques: vec![],
            claims: vec![prism_models::ClaimCheck {
                claim: "90% of studies agree".to_string(),
                assessment: "unsupported".to_string(),
                confidence: Some(0.8),
            }],
        }));
        let cache = Arc::new(RecordingCache::new());

        let controller = RhetoricalOperation::controller(api, cache);
        controller
            .run(
                RhetoricalRequest::new(AnalysisSource::cached(ContentId::from_string("vid-8")))
                    .with_options(prism_models::RhetoricalOptions {
                        verify_claims: true,
                        analysis_types: vec![],
                    }),
            )
            .await;

        let state = controller.state();
        assert_eq!(state.result.unwrap().claims.len(), 1);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_cached_source_hydration_flow() {
        let api = Arc::new(ScriptedApi::new());
        let cache = Arc::new(RecordingCache::new());
        let controller = RhetoricalOperation::controller(api, cache);

        let report = RhetoricalReport {
            thesis: Some("Technology centralizes power.".to_string()),
            techniques: vec![],
            claims: vec![],
        };
        controller.hydrate_from_cache(report.clone());

        let state = controller.state();
        assert!(state.is_cached);
        assert_eq!(state.result.unwrap(), report);
    }

    #[test]
    fn test_cache_key_from_cached_source() {
        let op = RhetoricalOperation::new(
            Arc::new(ScriptedApi::new()),
            Arc::new(RecordingCache::new()),
        );
        let request =
            RhetoricalRequest::new(AnalysisSource::cached(ContentId::from_string("vid-5")));
        assert_eq!(op.cache_key(&request).unwrap().as_str(), "vid-5");
    }
}
