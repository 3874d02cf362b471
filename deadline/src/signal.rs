use std::fmt::{Debug, Formatter};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[cfg(test)]
mod tests;

/// One-shot broadcast signal.
///
/// Fires at most once. Every clone shares the same state, and observing it never consumes it:
/// any number of current and later observers see the fired state.
#[derive(Clone)]
pub struct DeadlineSignal {
  inner: Arc<State>,
}

struct State {
  fired: AtomicBool,
  notify: Notify,
}

impl DeadlineSignal {
  /// Creates an unfired signal.
  pub fn new() -> Self {
    Self {
      inner: Arc::new(State {
        fired: AtomicBool::new(false),
        notify: Notify::new(),
      }),
    }
  }

  pub(crate) fn fire(&self) {
    if !self.inner.fired.swap(true, Ordering::SeqCst) {
      self.inner.notify.notify_waiters();
    }
  }

  /// Non-blocking check of the fired state.
  pub fn is_fired(&self) -> bool {
    self.inner.fired.load(Ordering::SeqCst)
  }

  /// Resolves once the signal has fired. Resolves immediately if it already has.
  pub async fn fired(&self) {
    loop {
      if self.is_fired() {
        break;
      }
      let notified = self.inner.notify.notified();
      if self.is_fired() {
        break;
      }
      notified.await;
    }
  }

  /// Returns `true` if both handles observe the same epoch.
  pub fn same_identity(&self, other: &DeadlineSignal) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Default for DeadlineSignal {
  fn default() -> Self {
    Self::new()
  }
}

impl Debug for DeadlineSignal {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DeadlineSignal")
      .field("fired", &self.is_fired())
      .finish()
  }
}

impl PartialEq for DeadlineSignal {
  fn eq(&self, other: &Self) -> bool {
    self.same_identity(other)
  }
}

impl Eq for DeadlineSignal {}

impl IntoFuture for DeadlineSignal {
  type Output = ();
  type IntoFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

  fn into_future(self) -> Self::IntoFuture {
    Box::pin(async move { self.fired().await })
  }
}

static_assertions::assert_impl_all!(DeadlineSignal: Send, Sync);
