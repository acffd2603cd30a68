//! alertr - a completion alert wrapper for long-running commands
//!
//! alertr runs a command up to a retry budget with a per-run time limit,
//! and emails or texts you when the runs complete, fail repeatedly, or
//! time out.

pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod runner;
pub mod secrets;

pub use error::{AlertrError, Result};
