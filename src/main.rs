use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use alertr::cli::Cli;
use alertr::config::{Config, RunConfig};
use alertr::notify::SmtpNotifier;
use alertr::runner::{AlertLoop, LoopSummary};
use alertr::secrets::CredentialStore;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("alertr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("alertr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<LoopSummary> {
    let recipient = cli.recipient().context("Failed to resolve the receiver")?;
    let command = cli.target_command().context("Nothing to run")?;
    let run_config = RunConfig::new(cli.sender.clone(), recipient.address.clone(), config);

    if cli.is_verbose() {
        println!(
            "{}",
            format!(
                "alerting {} via {}:{}",
                recipient.address, run_config.relay_host, run_config.relay_port
            )
            .yellow()
        );
        println!("{}", format!("wrapping: {}", command.display()).yellow());
    }

    info!(
        "alerting {} via {}:{}, wrapping: {}",
        recipient.address,
        run_config.relay_host,
        run_config.relay_port,
        command.display()
    );

    let credentials = CredentialStore::new(&config.credentials.service, &cli.sender)
        .context("Failed to access the keyring")?;
    let notifier = SmtpNotifier::new(&run_config, recipient.mode, credentials);
    let alert_loop = AlertLoop::new(run_config, notifier);

    Ok(alert_loop.run(&command).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let summary = run_application(&cli, &config).await?;

    match &summary {
        LoopSummary::Completed { runs } => {
            println!("{}", format!("all {} runs completed", runs).green());
        }
        LoopSummary::FailedOut { fails } => {
            println!(
                "{}",
                format!("stopped after {} consecutive failed run(s)", fails).red()
            );
        }
        LoopSummary::TimedOut { elapsed } => {
            println!(
                "{}",
                format!("stopped: run timed out after {}s", elapsed.as_secs()).red()
            );
        }
    }

    if !summary.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
