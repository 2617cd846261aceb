use app_config::{AppConfig, Credentials};
use errors::AppError;
use phone_number_updater::{PhoneNumberUpdater, UpdateSummary};
use rate_limiter::RateLimiter;
use zendesk_directory::ZendeskDirectory;

pub mod errors;
pub mod logging;
pub mod phone_number;
pub mod phone_number_updater;
pub mod rate_limiter;
#[cfg(test)]
pub mod testing_helper_methods;

/// Connects to the directory and sanitizes every user's phone number.
pub async fn run_phone_number_update(
  credentials: Credentials,
  config: &AppConfig,
) -> Result<UpdateSummary, AppError> {
  let Credentials {
    service_url,
    username,
    password,
  } = credentials;

  println!("Attempting to connect to Zendesk with user: '{username}' at url: {service_url}");

  let user_directory =
    ZendeskDirectory::connect(&service_url, &username, password, config.request_timeout())
      .await
      .map_err(AppError::ConnectionError)?;
  let rate_limiter = RateLimiter::new(config.requests_per_window(), config.rate_window());

  PhoneNumberUpdater::new(&user_directory, rate_limiter)
    .run()
    .await
}
