#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
  #[error("{}", .0)]
  ReqwestError(#[from] reqwest::Error),

  #[error("{}", .0)]
  UrlParseError(#[from] url::ParseError),

  #[error("{}", .0)]
  SerdeError(#[from] serde_json::Error),

  #[error(
    "`{}` is not a usable service url. Expected something like https://yoursite.zendesk.com/api/v2",
    .0
  )]
  UnsupportedBaseUrl(String),

  #[error("The credentials for `{}` were rejected by {}.", username, url)]
  InvalidCredentials { username: String, url: String },

  #[error("Received a failed response from {}. Code: {}", location, code)]
  FailedResponse { location: &'static str, code: u16 },
}
