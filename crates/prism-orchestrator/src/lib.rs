//! Analysis orchestration for Prism.
//!
//! The service performs analyses as single long-running requests with no
//! observable progress, so the client side carries the orchestration:
//! - [`AnalysisController`] - the stateful request/response/cache flow,
//!   generic over an [`AnalysisOperation`] and instantiated once per kind
//! - [`progress`] - the synthesized, timer-driven progress walk shown while
//!   a request is in flight
//! - [`ops`] - the five concrete operations (summary, rhetorical,
//!   manipulation, discovery, prompt generation)
//! - [`validate`] - local submission checks that run before any network call
//!
//! Controller state is observed reactively through a `tokio::sync::watch`
//! channel; `run` is fire-and-forget from the caller's perspective.

pub mod controller;
pub mod ops;
pub mod progress;
pub mod state;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{AnalysisController, AnalysisOperation, DEFAULT_ERROR, SERVICE_UNREACHABLE};
pub use ops::{
    DiscoveryOperation, ManipulationOperation, PromptOperation, RhetoricalOperation,
    SummaryOperation,
};
pub use progress::{ProgressPhase, ProgressPlan, ProgressState};
pub use state::ControllerState;
pub use validate::{validate_playlist_url, validate_text_submission, ValidationError, MIN_TEXT_WORDS};
