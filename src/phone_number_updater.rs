use crate::errors::AppError;
use crate::phone_number::sanitize_phone_number;
use crate::rate_limiter::RateLimiter;
use human_time::ToHumanTimeString;
use zendesk_directory::{User, UserDirectory};

const NO_PHONE_NUMBER: &str = "<none>";

/// Walks every user in the directory and writes back the ones whose phone number changes after sanitizing.
pub struct PhoneNumberUpdater<'a, D: UserDirectory> {
  user_directory: &'a D,
  rate_limiter: RateLimiter,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
  pub users_checked: usize,
  pub users_updated: usize,
  pub users_unchanged: usize,
}

impl<'a, D: UserDirectory> PhoneNumberUpdater<'a, D> {
  pub fn new(user_directory: &'a D, rate_limiter: RateLimiter) -> Self {
    Self {
      user_directory,
      rate_limiter,
    }
  }

  /// Processes users in the order the directory returns them.
  ///
  /// # Errors
  /// - The user list couldn't be retrieved. Nothing is updated.
  /// - An update failed. The remaining users are skipped, and updates made before it are kept.
  pub async fn run(self) -> Result<UpdateSummary, AppError> {
    let all_users = self
      .user_directory
      .fetch_all_users()
      .await
      .map_err(AppError::FetchError)?;
    let mut summary = UpdateSummary {
      users_checked: all_users.len(),
      ..Default::default()
    };

    println!("Checking phone numbers for {} users.", all_users.len());

    for user in all_users {
      let Some(sanitized_user) = with_sanitized_phone_number(&user) else {
        summary.users_unchanged += 1;
        continue;
      };

      println!(
        "Updating {} {} to {}",
        user.name,
        user.phone.as_deref().unwrap_or(NO_PHONE_NUMBER),
        sanitized_user.phone.as_deref().unwrap_or(NO_PHONE_NUMBER)
      );

      self.wait_for_rate_budget().await;
      self.rate_limiter.record_call();

      if let Err(error) = self.user_directory.update_user(&sanitized_user).await {
        tracing::error!(
          "Stopping after {} of {} users were updated.",
          summary.users_updated,
          summary.users_checked
        );

        return Err(AppError::UpdateError {
          user_id: sanitized_user.id,
          user_name: sanitized_user.name,
          source: error,
        });
      }

      summary.users_updated += 1;
    }

    tracing::info!("Phone number update finished: {summary:?}");

    Ok(summary)
  }

  async fn wait_for_rate_budget(&self) {
    if !self.rate_limiter.is_over_budget() {
      return;
    }

    println!(
      "Api limit of {} requests reached. Waiting for next refresh in {}...",
      self.rate_limiter.budget(),
      self.rate_limiter.time_until_reset().to_human_time_string()
    );

    self.rate_limiter.block_if_over_budget().await;

    println!("Done");
  }
}

/// Returns the user with a sanitized phone number, or None if sanitizing changes nothing.
fn with_sanitized_phone_number(user: &User) -> Option<User> {
  let sanitized_phone_number = sanitize_phone_number(user.phone.as_deref());

  if sanitized_phone_number == user.phone {
    return None;
  }

  Some(User {
    phone: sanitized_phone_number,
    ..user.clone()
  })
}
