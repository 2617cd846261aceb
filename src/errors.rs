use zendesk_directory::DirectoryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("An error occurred when initializing the config: `{}`", .0)]
  ConfigError(anyhow::Error),

  #[error("Failed to set up logging. Reason: {}", .0)]
  LoggingError(String),

  #[error("Failed to connect to the user directory. Reason: {}", .0)]
  ConnectionError(DirectoryError),

  #[error("Failed to retrieve the user list. Reason: {}", .0)]
  FetchError(DirectoryError),

  /// Updates applied before this one are kept.
  #[error("Failed to update user {} ({}). Reason: {}", user_name, user_id, source)]
  UpdateError {
    user_id: u64,
    user_name: String,
    source: DirectoryError,
  },
}
