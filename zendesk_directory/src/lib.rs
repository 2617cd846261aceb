#![allow(async_fn_in_trait)]

pub mod errors;
pub mod user;
pub mod zendesk;

#[cfg(test)]
pub mod testing_helper_methods;

pub use errors::DirectoryError;
pub use user::User;
pub use zendesk::ZendeskDirectory;

/// The remote user directory the sanitizer reads from and writes back to.
pub trait UserDirectory {
  /// Returns every user in the directory. Paginated responses are fully drained before returning.
  async fn fetch_all_users(&self) -> Result<Vec<User>, DirectoryError>;

  /// Persists the user's current field values.
  async fn update_user(&self, user: &User) -> Result<(), DirectoryError>;
}
