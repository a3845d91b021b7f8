//! Prompt generation.

use std::sync::Arc;

use async_trait::async_trait;

use prism_client::{AnalysisApi, AnalysisCache};
use prism_models::{AnalysisKind, ContentId, PromptRequest, PromptSet};

use crate::controller::{AnalysisController, AnalysisOperation};
use crate::progress::{ProgressPlan, PROMPT_PHASES, PROMPT_TICK};

/// Prompt generation wired to the service.
pub struct PromptOperation {
    api: Arc<dyn AnalysisApi>,
    cache: Arc<dyn AnalysisCache>,
}

impl PromptOperation {
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
impl AnalysisOperation for PromptOperation {
    type Request = PromptRequest;
    type Output = PromptSet;

    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Prompts
    }

    fn plan(&self, _request: &PromptRequest) -> ProgressPlan {
        ProgressPlan::Walk {
            phases: &PROMPT_PHASES,
            tick: PROMPT_TICK,
        }
    }

    fn cache_key(&self, request: &PromptRequest) -> Option<ContentId> {
        request.source.content_id().cloned()
    }

    async fn execute(&self, request: &PromptRequest) -> prism_client::Result<PromptSet> {
        self.api.generate_prompts(request).await
    }

    async fn write_cache(
        &self,
        content_id: &ContentId,
        output: &PromptSet,
    ) -> prism_client::Result<()> {
        self.cache.save_prompts(content_id, output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingCache, ScriptedApi};
    use prism_models::{AnalysisSource, GeneratedPrompt, PromptOptions};

    #[tokio::test]
    async fn test_prompt_run_with_categories() {
        let api = Arc::new(ScriptedApi::new());
        api.push_prompts(Ok(PromptSet {
            prompts: vec![GeneratedPrompt {
                category: "socratic".to_string(),
                text: "What would falsify the speaker's claim?".to_string(),
            }],
        }));
        let cache = Arc::new(RecordingCache::new());
        let saves = cache.saves();

        let controller = PromptOperation::controller(api, cache);
        controller
            .run(
                PromptRequest::new(AnalysisSource::cached(ContentId::from_string("vid-3")))
                    .with_options(PromptOptions {
                        categories: vec!["socratic".to_string()],
                    }),
            )
            .await;

        let state = controller.state();
        assert_eq!(state.result.unwrap().prompts.len(), 1);
        assert_eq!(saves.lock().unwrap().len(), 1);
    }
}
