use std::str::FromStr;

#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LoggingConfigLevel {
  #[default]
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl From<LoggingConfigLevel> for tracing::Level {
  fn from(log_level: LoggingConfigLevel) -> Self {
    match log_level {
      LoggingConfigLevel::Error => tracing::Level::ERROR,
      LoggingConfigLevel::Warn => tracing::Level::WARN,
      LoggingConfigLevel::Info => tracing::Level::INFO,
      LoggingConfigLevel::Debug => tracing::Level::DEBUG,
      LoggingConfigLevel::Trace => tracing::Level::TRACE,
    }
  }
}

impl LoggingConfigLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      LoggingConfigLevel::Error => "error",
      LoggingConfigLevel::Warn => "warn",
      LoggingConfigLevel::Info => "info",
      LoggingConfigLevel::Debug => "debug",
      LoggingConfigLevel::Trace => "trace",
    }
  }
}

impl FromStr for LoggingConfigLevel {
  type Err = Box<dyn std::error::Error>;

  fn from_str(log_value: &str) -> Result<Self, Self::Err> {
    match log_value.to_lowercase().trim() {
      "error" => Ok(LoggingConfigLevel::Error),
      "warn" => Ok(LoggingConfigLevel::Warn),
      "info" => Ok(LoggingConfigLevel::Info),
      "debug" => Ok(LoggingConfigLevel::Debug),
      "trace" => Ok(LoggingConfigLevel::Trace),
      _ => Err(
        format!("Unknown log level {log_value:?}. Expected one of error, warn, info, debug or trace.")
          .into(),
      ),
    }
  }
}

impl std::fmt::Display for LoggingConfigLevel {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    formatter.write_str(self.as_str())
  }
}
