//! Summary analysis.

use std::sync::Arc;

use async_trait::async_trait;

use prism_client::{AnalysisApi, AnalysisCache};
use prism_models::{AnalysisKind, ContentId, Summary, SummaryRequest};

use crate::controller::{AnalysisController, AnalysisOperation};
use crate::progress::{ProgressPlan, SUMMARY_PHASES, SUMMARY_TICK};

/// Summary analysis wired to the service.
pub struct SummaryOperation {
    api: Arc<dyn AnalysisApi>,
    cache: Arc<dyn AnalysisCache>,
}

impl SummaryOperation {
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
impl AnalysisOperation for SummaryOperation {
    type Request = SummaryRequest;
    type Output = Summary;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Summary
    }

    fn plan(&self, _request: &SummaryRequest) -> ProgressPlan {
        ProgressPlan::Walk {
            phases: &SUMMARY_PHASES,
            tick: SUMMARY_TICK,
        }
    }

    fn cache_key(&self, request: &SummaryRequest) -> Option<ContentId> {
        request.source.content_id().cloned()
    }

    async fn execute(&self, request: &SummaryRequest) -> prism_client::Result<Summary> {
        self.api.summarize(request).await
    }

    async fn write_cache(
        &self,
        content_id: &ContentId,
        output: &Summary,
    ) -> prism_client::Result<()> {
        self.cache.save_summary(content_id, output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingCache, ScriptedApi};
    use prism_models::{AnalysisSource, Transcript};

    fn summary() -> Summary {
        Summary {
            overview: "A talk about gardens.".to_string(),
            key_points: vec!["soil matters".to_string()],
            topics: vec!["gardening".to_string()],
        }
    }

    #[tokio::test]
    async fn test_summary_run_caches_under_content_id() {
        let api = Arc::new(ScriptedApi::new());
        api.push_summary(Ok(summary()));
        let cache = Arc::new(RecordingCache::new());
        let saves = cache.saves();

        let controller = SummaryOperation::controller(api, cache);
        controller
            .run(SummaryRequest::new(AnalysisSource::transcript_for(
                Transcript::from_text("plants and dirt"),
                ContentId::from_string("vid-garden"),
            )))
            .await;

        let state = controller.state();
        assert_eq!(state.result.unwrap(), summary());

        let saves = saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].0, AnalysisKind::Summary);
        assert_eq!(saves[0].1.as_str(), "vid-garden");
    }
}
