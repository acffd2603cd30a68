//! Retry loop implementation.
//!
//! The AlertLoop runs the target command up to the run budget, tracks
//! consecutive failures, and hands exactly one terminal alert to the
//! notifier before returning.

use chrono::Local;
use log::{info, warn};

use crate::config::RunConfig;
use crate::notify::{Alert, Notifier};
use crate::runner::command::TargetCommand;
use crate::runner::outcome::{LoopSummary, RunOutcome};

/// Wraps a command in a bounded retry loop with alerting.
pub struct AlertLoop<N: Notifier> {
    config: RunConfig,
    notifier: N,
}

impl<N: Notifier> AlertLoop<N> {
    pub fn new(config: RunConfig, notifier: N) -> Self {
        Self { config, notifier }
    }

    /// Run the command until the budget is spent or the loop trips.
    ///
    /// Each run:
    /// 1. Executes the command with the per-run time limit
    /// 2. On success: resets the consecutive failure counter
    /// 3. On timeout: alerts and stops, nothing is retried after a kill
    /// 4. On failure at the threshold: alerts and stops
    /// 5. On failure below the threshold: alerts that a retry is coming,
    ///    then sleeps `base_delay * consecutive failures`
    ///
    /// Exactly one terminal alert is sent on every path.
    pub async fn run(&self, command: &TargetCommand) -> LoopSummary {
        let mut num_fails: u32 = 0;

        for run in 1..=self.config.max_runs {
            println!("executing run {} of {}...", run, self.config.max_runs);
            info!("run {}/{}: {}", run, self.config.max_runs, command.display());

            let outcome = command.execute(self.config.timeout).await;
            let summary = self.handle_outcome(run, outcome, &mut num_fails).await;

            println!("{}", "-".repeat(120));
            if let Some(summary) = summary {
                return summary;
            }
        }

        let alert = Alert::completed(Local::now());
        println!("{}", alert.body);
        self.send(&alert).await;
        LoopSummary::Completed { runs: self.config.max_runs }
    }

    /// Apply one run's outcome to the loop state. Returns the final
    /// summary when the loop is done.
    async fn handle_outcome(
        &self,
        run: u32,
        outcome: RunOutcome,
        num_fails: &mut u32,
    ) -> Option<LoopSummary> {
        match outcome {
            RunOutcome::Success => {
                *num_fails = 0;
                None
            }
            RunOutcome::Timeout(elapsed) => {
                let alert = Alert::timeout(Local::now(), elapsed);
                println!("{}", alert.body);
                self.send(&alert).await;
                Some(LoopSummary::TimedOut { elapsed })
            }
            RunOutcome::Failure(reason) => {
                *num_fails += 1;
                warn!("run {} failed: {}", run, reason);

                if *num_fails >= self.config.max_fails {
                    println!("reached {} fails", self.config.max_fails);
                    let alert = Alert::failure(Local::now());
                    self.send(&alert).await;
                    println!("{}", alert.body);
                    return Some(LoopSummary::FailedOut { fails: *num_fails });
                }

                // Out of budget anyway; the completion alert covers it.
                if run < self.config.max_runs {
                    let alert = Alert::retrying(Local::now());
                    self.send(&alert).await;
                    println!("{}", alert.body);

                    let delay = self.config.base_delay * *num_fails;
                    info!("waiting {}s before retry", delay.as_secs());
                    tokio::time::sleep(delay).await;
                }
                None
            }
        }
    }

    /// Deliver an alert. Delivery problems are logged and swallowed so
    /// a flaky relay never aborts the loop.
    async fn send(&self, alert: &Alert) {
        if let Err(err) = self.notifier.alert(alert).await {
            warn!("alert delivery failed: {}", err);
        }
    }
}
