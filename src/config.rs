use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub relay: RelayConfig,
    pub retry: RetryConfig,
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total run budget
    pub max_runs: u32,
    /// Consecutive failures allowed before the loop stops and alerts
    pub max_fails: u32,
    /// Base delay in seconds; the actual wait scales with the failure count
    pub base_delay_secs: u64,
    /// Per-run time limit in seconds
    pub timeout_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_runs: 3,
            max_fails: 1,
            base_delay_secs: 30,
            timeout_secs: 20 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Keyring service name passwords are filed under
    pub service: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            service: "alertr".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            relay: RelayConfig::default(),
            retry: RetryConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Everything one invocation of the retry loop needs, resolved from the
/// CLI arguments and the config file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sender: String,
    pub receiver: String,
    pub relay_host: String,
    pub relay_port: u16,
    pub max_runs: u32,
    pub max_fails: u32,
    pub timeout: Duration,
    pub base_delay: Duration,
}

impl RunConfig {
    pub fn new(sender: String, receiver: String, config: &Config) -> Self {
        Self {
            sender,
            receiver,
            relay_host: config.relay.host.clone(),
            relay_port: config.relay.port,
            max_runs: config.retry.max_runs,
            max_fails: config.retry.max_fails,
            timeout: Duration::from_secs(config.retry.timeout_secs),
            base_delay: Duration::from_secs(config.retry.base_delay_secs),
        }
    }
}
