//! Observable controller state.

use serde::Serialize;

use crate::progress::ProgressState;

/// The state one controller exposes to its observers.
///
/// At most one of `error` and `result` is ever set; `run` clears the one it
/// is not about to set before the call settles, so a transient frame with
/// both `None` is normal and a frame with both `Some` is a defect.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerState<R> {
    /// A run is in flight.
    pub loading: bool,

    /// User-facing message for the last failed run.
    pub error: Option<String>,

    /// Result of the last successful run or cache hydration.
    pub result: Option<R>,

    /// The result arrived via cache hydration rather than a fresh call.
    /// Implies `loading == false` and `error == None`.
    pub is_cached: bool,

    /// Synthesized progress for the run in flight, or the terminal state
    /// just after success. `None` when idle or after an error.
    pub progress: Option<ProgressState>,
}

impl<R> Default for ControllerState<R> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            result: None,
            is_cached: false,
            progress: None,
        }
    }
}

impl<R> ControllerState<R> {
    /// True in the initial all-clear state.
    pub fn is_idle(&self) -> bool {
        !self.loading
            && self.error.is_none()
            && self.result.is_none()
            && !self.is_cached
            && self.progress.is_none()
    }
}
