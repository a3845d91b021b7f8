//! The generic analysis controller.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use prism_client::ClientError;
use prism_models::{AnalysisKind, ContentId, RunId};

use crate::progress::{ProgressPlan, ProgressState, ProgressTicker};
use crate::state::ControllerState;

/// Fixed message shown when no response reached the client at all.
pub const SERVICE_UNREACHABLE: &str =
    "Unable to reach the analysis service. Check that the backend is running and try again.";

/// Fallback when a failure carries no usable message.
pub const DEFAULT_ERROR: &str = "Analysis failed. Please try again.";

/// One analysis kind's request/result/cache surface.
///
/// Implementations bind the generic controller to a concrete kind: the
/// request and output types, the progress plan for a given request, how to
/// issue the single service call, and where results may be written back to
/// the cache.
#[async_trait]
pub trait AnalysisOperation: Send + Sync + 'static {
    type Request: Send + Sync;
    type Output: Clone + Send + Sync + 'static;

    /// The analysis kind this operation drives.
    fn kind(&self) -> AnalysisKind;

    /// Progress plan for this request.
    fn plan(&self, request: &Self::Request) -> ProgressPlan;

    /// Content ID results should be cached under, when the request carries
    /// one.
    fn cache_key(&self, request: &Self::Request) -> Option<ContentId>;

    /// Issues the single service call for this run.
    async fn execute(&self, request: &Self::Request) -> prism_client::Result<Self::Output>;

    /// Writes a successful result to the cache.
    async fn write_cache(
        &self,
        content_id: &ContentId,
        output: &Self::Output,
    ) -> prism_client::Result<()>;
}

/// Stateful orchestrator for one analysis kind.
///
/// `run` issues exactly one service call, drives the synthesized progress
/// walk while it is in flight, and writes the final state through a watch
/// channel for observers. Nothing sequences overlapping `run` calls: a
/// second call while the first is in flight replaces its effect with
/// last-write-wins semantics, and the first run's cache save may still land
/// afterwards. Callers that need ordering must wait for the state to settle
/// before re-running.
pub struct AnalysisController<Op: AnalysisOperation> {
    op: Op,
    state: Arc<watch::Sender<ControllerState<Op::Output>>>,
    ticker: Mutex<Option<ProgressTicker>>,
}

impl<Op: AnalysisOperation> AnalysisController<Op> {
    /// Creates a controller in the initial idle state.
    pub fn new(op: Op) -> Self {
        Self {
            op,
            state: Arc::new(watch::channel(ControllerState::default()).0),
            ticker: Mutex::new(None),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState<Op::Output>> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ControllerState<Op::Output> {
        self.state.borrow().clone()
    }

    /// Runs one analysis.
    ///
    /// Fire-and-forget from the caller's perspective: the outcome lands in
    /// the observable state, never in a return value. The single service
    /// call is not retried; retry is a new `run`. A best-effort cache save
    /// follows success when the request carries a content ID, and its
    /// failure is logged but never surfaces.
    pub async fn run(&self, request: Op::Request) {
        let run_id = RunId::new();
        let kind = self.op.kind();
        debug!(%run_id, %kind, "starting analysis run");

        self.cancel_ticker();
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
            state.result = None;
            state.is_cached = false;
            state.progress = None;
        });
        self.start_ticker(self.op.plan(&request));

        match self.op.execute(&request).await {
            Ok(output) => {
                self.cancel_ticker();
                let cached_result = output.clone();
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = None;
                    state.result = Some(output);
                    state.is_cached = false;
                    state.progress = Some(ProgressState::complete());
                });
                info!(%run_id, %kind, "analysis complete");

                if let Some(content_id) = self.op.cache_key(&request) {
                    if let Err(e) = self.op.write_cache(&content_id, &cached_result).await {
                        // Best-effort: the result is already delivered.
                        warn!(%run_id, %kind, %content_id, error = %e, "cache save failed");
                    } else {
                        debug!(%run_id, %kind, %content_id, "result cached");
                    }
                }
            }
            Err(e) => {
                self.cancel_ticker();
                let message = error_message(&e);
                warn!(%run_id, %kind, error = %e, "analysis failed");
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(message);
                    state.result = None;
                    state.is_cached = false;
                    state.progress = None;
                });
            }
        }
    }

    /// Adopts a previously fetched result as if freshly computed, marking it
    /// as cache-sourced. No network call is made.
    pub fn hydrate_from_cache(&self, output: Op::Output) {
        self.cancel_ticker();
        self.state.send_modify(|state| {
            state.loading = false;
            state.error = None;
            state.result = Some(output);
            state.is_cached = true;
            state.progress = None;
        });
        debug!(kind = %self.op.kind(), "hydrated from cache");
    }

    /// Returns to the initial all-clear state. Idempotent.
    pub fn reset(&self) {
        self.cancel_ticker();
        self.state.send_replace(ControllerState::default());
    }

    fn start_ticker(&self, plan: ProgressPlan) {
        match plan {
            ProgressPlan::Fixed { phase } => {
                self.state
                    .send_modify(|state| state.progress = Some(phase.into()));
            }
            ProgressPlan::Walk { phases, tick } => {
                let Some(first) = phases.first() else {
                    return;
                };
                self.state
                    .send_modify(|state| state.progress = Some((*first).into()));

                let state = Arc::clone(&self.state);
                let ticker = ProgressTicker::spawn(phases, tick, move |progress| {
                    state.send_modify(|state| {
                        // A straggling tick must not repaint a settled run.
                        if state.loading {
                            state.progress = Some(progress);
                        }
                    });
                });
                *self.ticker.lock().unwrap() = Some(ticker);
            }
        }
    }

    fn cancel_ticker(&self) {
        // Dropping the handle aborts the walk task.
        self.ticker.lock().unwrap().take();
    }
}

/// Maps a client failure to the user-facing message: transport failures get
/// the fixed unreachable-service message; server-reported failures surface
/// their detail verbatim; anything else falls back to the error's display
/// string, then the hardcoded default.
fn error_message(error: &ClientError) -> String {
    match error {
        ClientError::Transport(_) => SERVICE_UNREACHABLE.to_string(),
        ClientError::Api { detail, .. } if !detail.trim().is_empty() => detail.clone(),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                DEFAULT_ERROR.to_string()
            } else {
                text
            }
        }
    }
}
