use crate::errors::AppError;
use app_config::{AppConfig, log_level_wrapper::LoggingConfigLevel};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;

const HTTP_CLIENT_LOG_LEVEL: LoggingConfigLevel = LoggingConfigLevel::Warn;

pub fn setup_logging_config(config: &AppConfig) -> Result<(), AppError> {
  let Some(log_level) = config.log_level() else {
    return Ok(());
  };

  let filter_string = format!(
    "{},reqwest={http_level},hyper={http_level},hyper_util={http_level}",
    log_level,
    http_level = HTTP_CLIENT_LOG_LEVEL
  );
  let env_filter = EnvFilter::new(filter_string);

  let subscriber_builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_ansi(false);

  if let Some(logging_dir) = config.logging_dir() {
    let mut appender_builder =
      RollingFileAppender::builder().rotation(config.logging_rotation().into());

    if !config.logging_filename_prefix().is_empty() {
      appender_builder = appender_builder.filename_prefix(config.logging_filename_prefix());
    }

    let file_appender = appender_builder
      .build(logging_dir)
      .map_err(|error| AppError::LoggingError(error.to_string()))?;

    subscriber_builder
      .with_writer(file_appender)
      .try_init()
      .map_err(|error| AppError::LoggingError(error.to_string()))?;
  } else {
    subscriber_builder
      .try_init()
      .map_err(|error| AppError::LoggingError(error.to_string()))?;
  }

  Ok(())
}
