//! Target command execution.
//!
//! Runs the wrapped command once with a time limit. The child inherits
//! stdout/stderr so its output lands on the console as if it were run
//! directly.

use std::time::{Duration, Instant};

use tokio::process::Command;

use crate::error::{AlertrError, Result};
use crate::runner::outcome::RunOutcome;

/// The external command the retry loop runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCommand {
    argv: Vec<String>,
}

impl TargetCommand {
    /// Create a target command from its argv. The first element is the
    /// program, the rest are its arguments; an empty argv is rejected.
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.is_empty() {
            return Err(AlertrError::MissingCommand);
        }
        Ok(Self { argv })
    }

    /// The program name (argv[0]).
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// The full command line for display and logging.
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }

    /// Run the command once, enforcing the time limit.
    ///
    /// A non-zero exit or a spawn failure is a `Failure`; hitting the
    /// limit kills the child and yields `Timeout`.
    pub async fn execute(&self, limit: Duration) -> RunOutcome {
        let mut cmd = Command::new(&self.argv[0]);
        cmd.args(&self.argv[1..]);
        cmd.kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                return RunOutcome::Failure(format!(
                    "failed to start '{}': {}",
                    self.argv[0], err
                ));
            }
        };

        let start = Instant::now();
        match tokio::time::timeout(limit, child.wait()).await {
            Ok(Ok(status)) if status.success() => RunOutcome::Success,
            Ok(Ok(status)) => {
                RunOutcome::Failure(format!("exit code {}", status.code().unwrap_or(-1)))
            }
            Ok(Err(err)) => RunOutcome::Failure(format!("wait failed: {}", err)),
            Err(_) => {
                // Reap the child before reporting; kill_on_drop is the backstop.
                let _ = child.kill().await;
                RunOutcome::Timeout(start.elapsed())
            }
        }
    }
}
