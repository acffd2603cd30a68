//! Alert message construction.
//!
//! One constructor per terminal (or retrying) state of the loop. Bodies
//! carry a short timestamp like `Mon Aug 25 1432h`; subjects are only
//! used for plain email delivery.

use std::time::Duration;

use chrono::{DateTime, Local};

/// Timestamp format used in alert bodies.
const STAMP_FMT: &str = "%a %b %d %H%Mh";

/// A notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub subject: String,
    pub body: String,
}

impl Alert {
    /// A run failed but the loop will try again.
    pub fn retrying(at: DateTime<Local>) -> Self {
        Self {
            subject: "alertr: run failed".to_string(),
            body: format!("Command failed at {}. Retrying.", at.format(STAMP_FMT)),
        }
    }

    /// Consecutive failures hit the threshold; the loop is stopping.
    pub fn failure(at: DateTime<Local>) -> Self {
        Self {
            subject: "alertr: run failed".to_string(),
            body: format!("Command failed at {}.", at.format(STAMP_FMT)),
        }
    }

    /// A run hit the time limit; the loop is stopping.
    pub fn timeout(at: DateTime<Local>, elapsed: Duration) -> Self {
        Self {
            subject: "alertr: run timed out".to_string(),
            body: format!(
                "{} - command timed out after {} seconds",
                at.format(STAMP_FMT),
                elapsed.as_secs()
            ),
        }
    }

    /// Every run in the budget finished without tripping the threshold.
    pub fn completed(at: DateTime<Local>) -> Self {
        Self {
            subject: "alertr: runs completed".to_string(),
            body: format!("All runs completed @ {}", at.format(STAMP_FMT)),
        }
    }
}
