use tracing_appender::rolling::Rotation;

/// How often a new log file is started when logging to a directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFileRotation {
  #[serde(alias = "minute", alias = "minutes")]
  Minutely,
  #[serde(alias = "hour", alias = "hours")]
  Hourly,
  #[default]
  #[serde(alias = "day", alias = "days")]
  Daily,
  /// Everything goes into a single file.
  #[serde(alias = "none")]
  Never,
}

impl From<LogFileRotation> for Rotation {
  fn from(rotation: LogFileRotation) -> Self {
    match rotation {
      LogFileRotation::Minutely => Rotation::MINUTELY,
      LogFileRotation::Hourly => Rotation::HOURLY,
      LogFileRotation::Daily => Rotation::DAILY,
      LogFileRotation::Never => Rotation::NEVER,
    }
  }
}
