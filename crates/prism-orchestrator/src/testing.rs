//! Shared test doubles for the client boundary.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use prism_client::{AnalysisApi, AnalysisCache, ClientError};
use prism_models::{
    AnalysisKind, AnalysisResult, ContentId, DiscoveryReport, DiscoveryRequest,
    ManipulationReport, ManipulationRequest, PromptRequest, PromptSet, RhetoricalReport,
    RhetoricalRequest, Summary, SummaryRequest,
};

fn unscripted<T>(kind: AnalysisKind) -> prism_client::Result<T> {
    Err(ClientError::Api {
        status: 500,
        detail: format!("no scripted response for {kind}"),
    })
}

/// Analysis API double returning pre-scripted outcomes per kind.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    summaries: Mutex<VecDeque<prism_client::Result<Summary>>>,
    rhetorical: Mutex<VecDeque<prism_client::Result<RhetoricalReport>>>,
    manipulation: Mutex<VecDeque<prism_client::Result<ManipulationReport>>>,
    discovery: Mutex<VecDeque<prism_client::Result<DiscoveryReport>>>,
    prompts: Mutex<VecDeque<prism_client::Result<PromptSet>>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_summary(&self, outcome: prism_client::Result<Summary>) {
        self.summaries.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn push_manipulation(&self, outcome: prism_client::Result<ManipulationReport>) {
        self.manipulation.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn push_discovery(&self, outcome: prism_client::Result<DiscoveryReport>) {
        self.discovery.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn push_rhetorical(&self, outcome: prism_client::Result<RhetoricalReport>) {
        self.rhetorical.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn push_prompts(&self, outcome: prism_client::Result<PromptSet>) {
        self.prompts.lock().unwrap().push_back(outcome);
    }
}

#[async_trait]
impl AnalysisApi for ScriptedApi {
    async fn summarize(&self, _request: &SummaryRequest) -> prism_client::Result<Summary> {
        self.summaries
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| unscripted(AnalysisKind::Summary))
    }

    async fn analyze_rhetoric(
        &self,
        _request: &RhetoricalRequest,
    ) -> prism_client::Result<RhetoricalReport> {
        self.rhetorical
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| unscripted(AnalysisKind::Rhetorical))
    }

    async fn analyze_manipulation(
        &self,
        _request: &ManipulationRequest,
    ) -> prism_client::Result<ManipulationReport> {
        self.manipulation
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| unscripted(AnalysisKind::Manipulation))
    }

    async fn discover_connections(
        &self,
        _request: &DiscoveryRequest,
    ) -> prism_client::Result<DiscoveryReport> {
        self.discovery
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| unscripted(AnalysisKind::Discovery))
    }

    async fn generate_prompts(&self, _request: &PromptRequest) -> prism_client::Result<PromptSet> {
        self.prompts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| unscripted(AnalysisKind::Prompts))
    }
}

/// Cache double recording saves; fetches always miss.
#[derive(Default)]
pub(crate) struct RecordingCache {
    saves: Arc<Mutex<Vec<(AnalysisKind, ContentId, AnalysisResult)>>>,
}

impl RecordingCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn saves(&self) -> Arc<Mutex<Vec<(AnalysisKind, ContentId, AnalysisResult)>>> {
        Arc::clone(&self.saves)
    }

    fn record(&self, kind: AnalysisKind, content_id: &ContentId, result: AnalysisResult) {
        self.saves
            .lock()
            .unwrap()
            .push((kind, content_id.clone(), result));
    }
}

#[async_trait]
impl AnalysisCache for RecordingCache {
    async fn fetch_summary(&self, _content_id: &ContentId) -> prism_client::Result<Option<Summary>> {
        Ok(None)
    }

    async fn save_summary(
        &self,
        content_id: &ContentId,
        result: &Summary,
    ) -> prism_client::Result<()> {
        self.record(
            AnalysisKind::Summary,
            content_id,
            AnalysisResult::Summary(result.clone()),
        );
        Ok(())
    }

    async fn fetch_rhetorical(
        &self,
        _content_id: &ContentId,
    ) -> prism_client::Result<Option<RhetoricalReport>> {
        Ok(None)
    }

    async fn save_rhetorical(
        &self,
        content_id: &ContentId,
        result: &RhetoricalReport,
    ) -> prism_client::Result<()> {
        self.record(
            AnalysisKind::Rhetorical,
            content_id,
            AnalysisResult::Rhetorical(result.clone()),
        );
        Ok(())
    }

    async fn fetch_manipulation(
        &self,
        _content_id: &ContentId,
    ) -> prism_client::Result<Option<ManipulationReport>> {
        Ok(None)
    }

    async fn save_manipulation(
        &self,
        content_id: &ContentId,
        result: &ManipulationReport,
    ) -> prism_client::Result<()> {
        self.record(
            AnalysisKind::Manipulation,
            content_id,
            AnalysisResult::Manipulation(result.clone()),
        );
        Ok(())
    }

    async fn fetch_discovery(
        &self,
        _content_id: &ContentId,
    ) -> prism_client::Result<Option<DiscoveryReport>> {
        Ok(None)
    }

    async fn save_discovery(
        &self,
        content_id: &ContentId,
        result: &DiscoveryReport,
    ) -> prism_client::Result<()> {
        self.record(
            AnalysisKind::Discovery,
            content_id,
            AnalysisResult::Discovery(result.clone()),
        );
        Ok(())
    }

    async fn fetch_prompts(
        &self,
        _content_id: &ContentId,
    ) -> prism_client::Result<Option<PromptSet>> {
        Ok(None)
    }

    async fn save_prompts(
        &self,
        content_id: &ContentId,
        result: &PromptSet,
    ) -> prism_client::Result<()> {
        self.record(
            AnalysisKind::Prompts,
            content_id,
            AnalysisResult::Prompts(result.clone()),
        );
        Ok(())
    }
}
