//! Run outcome types.
//!
//! This module defines the result types for a single command run and
//! for the retry loop as a whole.

use std::time::Duration;

/// Outcome of a single command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Command exited with status zero
    Success,
    /// Command exited non-zero or could not be started
    Failure(String),
    /// Command hit the per-run time limit and was killed
    Timeout(Duration),
}

/// Final state of the retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopSummary {
    /// Budget used up without hitting the failure threshold
    Completed { runs: u32 },
    /// Consecutive failures reached the threshold
    FailedOut { fails: u32 },
    /// A run timed out; no further runs were attempted
    TimedOut { elapsed: Duration },
}

impl LoopSummary {
    /// Whether the loop ended without hitting a failure threshold or timeout.
    pub fn is_success(&self) -> bool {
        matches!(self, LoopSummary::Completed { .. })
    }
}
