use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use zendesk_directory::{DirectoryError, User, UserDirectory};

/// An in-memory directory that records every update it receives.
pub struct MockUserDirectory {
  users: Vec<User>,
  updated_users: Mutex<Vec<User>>,
  update_attempts: AtomicUsize,
  fail_on_update_number: Option<usize>,
  fail_fetch: bool,
}

impl MockUserDirectory {
  pub fn new(users: Vec<User>) -> Self {
    Self {
      users,
      updated_users: Mutex::new(vec![]),
      update_attempts: AtomicUsize::new(0),
      fail_on_update_number: None,
      fail_fetch: false,
    }
  }

  /// The nth update call (starting at 1) fails.
  pub fn failing_on_update(mut self, update_number: usize) -> Self {
    self.fail_on_update_number = Some(update_number);
    self
  }

  pub fn failing_fetch(mut self) -> Self {
    self.fail_fetch = true;
    self
  }

  pub fn updated_users(&self) -> Vec<User> {
    self.updated_users.lock().unwrap().clone()
  }

  pub fn update_attempts(&self) -> usize {
    self.update_attempts.load(Ordering::SeqCst)
  }
}

impl UserDirectory for MockUserDirectory {
  async fn fetch_all_users(&self) -> Result<Vec<User>, DirectoryError> {
    if self.fail_fetch {
      return Err(DirectoryError::FailedResponse {
        location: "mock fetch all users",
        code: 503,
      });
    }

    Ok(self.users.clone())
  }

  async fn update_user(&self, user: &User) -> Result<(), DirectoryError> {
    let attempt = self.update_attempts.fetch_add(1, Ordering::SeqCst) + 1;

    if self.fail_on_update_number == Some(attempt) {
      return Err(DirectoryError::FailedResponse {
        location: "mock update user",
        code: 500,
      });
    }

    self.updated_users.lock().unwrap().push(user.clone());

    Ok(())
  }
}

/// Users numbered from 1 whose phone numbers all need sanitizing.
pub fn unsanitized_users(count: u64) -> Vec<User> {
  (1..=count)
    .map(|id| User::new(id, format!("User {id}"), Some(format!("(555) 000-{id:04}").as_str())))
    .collect()
}
