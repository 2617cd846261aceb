use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Caps how many mutating calls are issued within a fixed window.
///
/// The counter is reset by a background task once per window. The reset and the caller's increment
/// aren't synchronized with each other: an increment racing a reset can be lost, which only makes
/// the limiter slightly more lenient for that window.
pub struct RateLimiter {
  budget: usize,
  window_duration: Duration,
  window: Arc<RateWindow>,
  reset_task: JoinHandle<()>,
}

struct RateWindow {
  calls_in_window: AtomicUsize,
  window_reset: Notify,
  created_at: Instant,
  /// Milliseconds between `created_at` and the most recent reset.
  last_reset_millis: AtomicU64,
}

impl RateLimiter {
  /// Creates the limiter and starts its window timer on the current tokio runtime.
  ///
  /// The first window ends `window_duration` after this is called.
  pub fn new(budget: usize, window_duration: Duration) -> Self {
    let window = Arc::new(RateWindow {
      calls_in_window: AtomicUsize::new(0),
      window_reset: Notify::new(),
      created_at: Instant::now(),
      last_reset_millis: AtomicU64::new(0),
    });
    let reset_task = tokio::spawn(reset_every_window(window.clone(), window_duration));

    Self {
      budget,
      window_duration,
      window,
      reset_task,
    }
  }

  pub fn record_call(&self) {
    self.window.calls_in_window.fetch_add(1, Ordering::AcqRel);
  }

  pub fn is_over_budget(&self) -> bool {
    self.calls_in_window() >= self.budget
  }

  /// Waits for the next window reset if the budget has been used up. Returns immediately otherwise.
  pub async fn block_if_over_budget(&self) {
    loop {
      let window_reset = self.window.window_reset.notified();
      tokio::pin!(window_reset);

      // Registered before the check so a reset landing in between still wakes us.
      window_reset.as_mut().enable();

      if !self.is_over_budget() {
        return;
      }

      tracing::debug!(
        "Rate budget of {} reached. Waiting for the window to reset.",
        self.budget
      );

      window_reset.await;
    }
  }

  pub fn calls_in_window(&self) -> usize {
    self.window.calls_in_window.load(Ordering::Acquire)
  }

  pub fn remaining_calls(&self) -> usize {
    self.budget.saturating_sub(self.calls_in_window())
  }

  pub fn time_until_reset(&self) -> Duration {
    let last_reset = Duration::from_millis(self.window.last_reset_millis.load(Ordering::Acquire));
    let since_last_reset = self
      .window
      .created_at
      .elapsed()
      .saturating_sub(last_reset);

    self.window_duration.saturating_sub(since_last_reset)
  }

  pub fn budget(&self) -> usize {
    self.budget
  }
}

impl Drop for RateLimiter {
  fn drop(&mut self) {
    self.reset_task.abort();
  }
}

async fn reset_every_window(window: Arc<RateWindow>, window_duration: Duration) {
  let mut reset_interval =
    tokio::time::interval_at(window.created_at + window_duration, window_duration);
  reset_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

  loop {
    let reset_at = reset_interval.tick().await;
    let since_creation = reset_at.duration_since(window.created_at);

    window
      .last_reset_millis
      .store(since_creation.as_millis() as u64, Ordering::Release);
    let previous_calls = window.calls_in_window.swap(0, Ordering::AcqRel);
    window.window_reset.notify_waiters();

    tracing::trace!("Rate window reset. {previous_calls} calls were made in the last window.");
  }
}
