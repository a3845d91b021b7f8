//! Synthesized analysis progress.
//!
//! The service gives no progress signal for a running analysis, so the
//! client fabricates one: a forward-only walk through a declared phase
//! table, advancing one phase per tick of a fixed interval. The walk is a
//! display device, not a measurement. When the real call settles first, the
//! walk is cancelled and progress jumps to the terminal state; when the call
//! fails, progress is cleared so no stale bar sits next to an error.

use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// One entry of a phase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPhase {
    /// Stable tag for the phase.
    pub tag: &'static str,
    /// Display label.
    pub name: &'static str,
    /// Percentage shown while in this phase.
    pub percent: u8,
    /// Display message.
    pub message: &'static str,
}

/// Snapshot of synthesized progress for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    pub phase: &'static str,
    pub phase_name: &'static str,
    /// 0-100, monotonic within one run.
    pub progress: u8,
    pub message: &'static str,
}

impl ProgressState {
    /// Terminal state forced when the real call resolves.
    pub fn complete() -> Self {
        Self {
            phase: "complete",
            phase_name: "Complete",
            progress: 100,
            message: "Analysis complete",
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}

impl From<ProgressPhase> for ProgressState {
    fn from(phase: ProgressPhase) -> Self {
        Self {
            phase: phase.tag,
            phase_name: phase.name,
            progress: phase.percent,
            message: phase.message,
        }
    }
}

/// How progress should be synthesized for one run.
#[derive(Debug, Clone, Copy)]
pub enum ProgressPlan {
    /// Walk the table one phase per tick.
    Walk {
        phases: &'static [ProgressPhase],
        tick: Duration,
    },
    /// Pin a single mid-point value with no timer (quick modes).
    Fixed { phase: ProgressPhase },
}

const fn phase(
    tag: &'static str,
    name: &'static str,
    percent: u8,
    message: &'static str,
) -> ProgressPhase {
    ProgressPhase {
        tag,
        name,
        percent,
        message,
    }
}

pub const SUMMARY_TICK: Duration = Duration::from_secs(5);
pub const SUMMARY_PHASES: [ProgressPhase; 4] = [
    phase("queued", "Queued", 10, "Waiting for an analysis slot"),
    phase("reading", "Reading", 30, "Reading the transcript"),
    phase("condensing", "Condensing", 60, "Condensing key points"),
    phase("drafting", "Drafting", 85, "Drafting the summary"),
];

pub const RHETORICAL_TICK: Duration = Duration::from_secs(8);
pub const RHETORICAL_PHASES: [ProgressPhase; 4] = [
    phase("queued", "Queued", 10, "Waiting for an analysis slot"),
    phase("parsing", "Parsing", 35, "Mapping the argument structure"),
    phase(
        "techniques",
        "Identifying techniques",
        65,
        "Identifying rhetorical techniques",
    ),
    phase("claims", "Checking claims", 85, "Cross-checking factual claims"),
];

pub const MANIPULATION_DEEP_TICK: Duration = Duration::from_secs(10);
pub const MANIPULATION_DEEP_PHASES: [ProgressPhase; 5] = [
    phase("queued", "Queued", 5, "Waiting for an analysis slot"),
    phase("scanning", "Scanning", 25, "Scanning for manipulation patterns"),
    phase("tactics", "Identifying tactics", 45, "Identifying specific tactics"),
    phase("scoring", "Scoring", 70, "Scoring tactic severity"),
    phase("compiling", "Compiling", 90, "Compiling the report"),
];

/// Quick-mode runs skip the walk entirely and pin this single value.
pub const QUICK_SCAN_PHASE: ProgressPhase =
    phase("analyzing", "Analyzing", 50, "Running quick scan");

pub const DISCOVERY_TICK: Duration = Duration::from_secs(5);
pub const DISCOVERY_PHASES: [ProgressPhase; 3] = [
    phase("queued", "Queued", 15, "Waiting for an analysis slot"),
    phase("mapping", "Mapping domains", 50, "Mapping related domains"),
    phase(
        "connecting",
        "Drawing connections",
        80,
        "Drawing cross-domain connections",
    ),
];

pub const PROMPT_TICK: Duration = Duration::from_secs(4);
pub const PROMPT_PHASES: [ProgressPhase; 3] = [
    phase("queued", "Queued", 15, "Waiting for an analysis slot"),
    phase("themes", "Extracting themes", 50, "Extracting prompt themes"),
    phase("writing", "Writing prompts", 80, "Writing prompts"),
];

/// Owned handle for one run's progress walk.
///
/// The walk runs as a background task and must never outlive the run it
/// belongs to: dropping the handle aborts the task, so a cancelled or
/// settled run cannot keep mutating a detached progress state.
pub(crate) struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Spawns a walk over `phases[1..]`, invoking `apply` once per tick.
    ///
    /// The first phase is expected to be applied by the caller at run start;
    /// the task ends on its own once the table is exhausted.
    pub(crate) fn spawn<F>(phases: &'static [ProgressPhase], tick: Duration, mut apply: F) -> Self
    where
        F: FnMut(ProgressState) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(tick);
            // The first interval tick completes immediately.
            ticker.tick().await;
            for phase in phases.iter().skip(1) {
                ticker.tick().await;
                apply(ProgressState::from(*phase));
            }
        });
        Self { handle }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
