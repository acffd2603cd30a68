//! Command retry loop.
//!
//! This module provides the execution half of alertr:
//! - TargetCommand for running the wrapped command with a time limit
//! - RunOutcome / LoopSummary for representing results
//! - AlertLoop for the bounded retry loop with alerting

pub mod command;
pub mod outcome;
pub mod retry;

pub use command::TargetCommand;
pub use outcome::{LoopSummary, RunOutcome};
pub use retry::AlertLoop;
