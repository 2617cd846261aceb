use crate::log_level_wrapper::*;
use crate::log_file_rotation::LogFileRotation;
use anyhow::anyhow;
use schematic::{Config, ConfigLoader};
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_PATH_ENV_VAR: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_FILEPATH: &str = "./config/config.yml";
const SECONDS_PER_MINUTE: u128 = 60;

#[derive(Debug, Config, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
  /// Logging is disabled when no level is set.
  #[setting(env = "LOG_LEVEL")]
  log_level: Option<LoggingConfigLevel>,
  logging_dir: Option<PathBuf>,
  #[setting(default = "")]
  logging_filename_prefix: String,
  logging_rotation: LogFileRotation,

  /// Zendesk documents 200 requests per minute. We scale back from that a little bit.
  #[setting(default = 180, env = "REQUESTS_PER_WINDOW")]
  requests_per_window: usize,
  #[setting(default = 60)]
  rate_window_seconds: u64,
  #[setting(default = 200)]
  service_rate_ceiling: usize,

  #[setting(default = 30)]
  request_timeout_seconds: u64,
}

impl AppConfig {
  /// Loads the config file at `CONFIG_PATH` (or the default path) if it exists, applying env overrides.
  pub fn load() -> anyhow::Result<Self> {
    let config = ConfigLoader::<AppConfig>::new()
      .file_optional(get_config_path())?
      .load()?
      .config;

    config.validate_rate_limits()?;

    Ok(config)
  }

  fn validate_rate_limits(&self) -> anyhow::Result<()> {
    if self.requests_per_window == 0 {
      return Err(anyhow!("requests_per_window must be greater than 0."));
    }

    if self.rate_window_seconds == 0 {
      return Err(anyhow!("rate_window_seconds must be greater than 0."));
    }

    if self.requests_per_window > self.service_rate_ceiling {
      return Err(anyhow!(
        "requests_per_window ({}) exceeds the service's limit of {} requests per minute.",
        self.requests_per_window,
        self.service_rate_ceiling
      ));
    }

    // Windows shorter than a minute repeat within one, so compare the per-minute rate.
    let requests_per_minute_scaled = self.requests_per_window as u128 * SECONDS_PER_MINUTE;
    let ceiling_scaled = self.service_rate_ceiling as u128 * self.rate_window_seconds as u128;

    if requests_per_minute_scaled > ceiling_scaled {
      return Err(anyhow!(
        "{} requests every {}s exceeds the service's limit of {} requests per minute.",
        self.requests_per_window,
        self.rate_window_seconds,
        self.service_rate_ceiling
      ));
    }

    Ok(())
  }

  pub fn log_level(&self) -> Option<LoggingConfigLevel> {
    self.log_level
  }

  pub fn logging_dir(&self) -> Option<&PathBuf> {
    self.logging_dir.as_ref()
  }

  pub fn logging_filename_prefix(&self) -> &str {
    &self.logging_filename_prefix
  }

  pub fn logging_rotation(&self) -> LogFileRotation {
    self.logging_rotation
  }

  pub fn requests_per_window(&self) -> usize {
    self.requests_per_window
  }

  pub fn rate_window(&self) -> Duration {
    Duration::from_secs(self.rate_window_seconds)
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_seconds)
  }
}

fn get_config_path() -> PathBuf {
  let Some(config_path) = std::env::var_os(CONFIG_PATH_ENV_VAR) else {
    return PathBuf::from(DEFAULT_CONFIG_FILEPATH);
  };

  PathBuf::from(config_path)
}
