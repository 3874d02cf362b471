use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::signal::DeadlineSignal;


/// Resettable expiry signal for one direction of a connection.
///
/// [`Deadline::set`] installs, refreshes or clears the expiry, and [`Deadline::wait`] returns the
/// [`DeadlineSignal`] of the current epoch. The signal fires once the most recently set expiry
/// passes. Once fired, the deadline can be refreshed by setting an expiry in the future, or cleared
/// with `None`; both swap in a fresh unfired signal and leave the fired one untouched for anyone
/// still holding it.
///
/// The deadline never performs I/O and never interrupts anything by itself: callers race the
/// signal against their own operation.
pub struct Deadline {
  inner: Arc<Mutex<Inner>>,
  runtime: Option<Handle>,
}

struct Inner {
  timer: Option<ArmedTimer>,
  signal: DeadlineSignal,
  expires_at: Option<Instant>,
  next_generation: u64,
}

struct ArmedTimer {
  generation: u64,
  handle: JoinHandle<()>,
}

impl Inner {
  fn disarm(&mut self) {
    if let Some(timer) = self.timer.take() {
      tracing::trace!("Deadline::set: cancel timer generation={}", timer.generation);
      timer.handle.abort();
    }
  }

  fn renew_signal_if_fired(&mut self) {
    if self.signal.is_fired() {
      tracing::debug!("Deadline::set: reset fired signal");
      self.signal = DeadlineSignal::new();
    }
  }
}

impl Deadline {
  /// Creates a deadline with no expiry and an unfired signal.
  ///
  /// Timers are spawned on the runtime that is current when [`Deadline::set`] is called.
  pub fn new() -> Self {
    Self::with_optional_runtime(None)
  }

  /// Creates a deadline whose timers are spawned on `runtime`.
  pub fn with_runtime(runtime: Handle) -> Self {
    Self::with_optional_runtime(Some(runtime))
  }

  pub(crate) fn with_optional_runtime(runtime: Option<Handle>) -> Self {
    Self {
      inner: Arc::new(Mutex::new(Inner {
        timer: None,
        signal: DeadlineSignal::new(),
        expires_at: None,
        next_generation: 0,
      })),
      runtime,
    }
  }

  /// Sets the point in time at which the deadline expires.
  ///
  /// * `None` clears the deadline. A fired signal is replaced with a fresh one.
  /// * A future instant arms a timer that fires the signal at that instant. A fired signal is
  ///   replaced first.
  /// * A present or past instant fires the signal immediately.
  ///
  /// Any previously armed timer is cancelled first. The lock is shared with the timer callback, so
  /// a callback already in the middle of firing finishes before this method proceeds, and a callback
  /// that has not taken the lock yet finds its generation superseded and does nothing.
  ///
  /// # Panics
  ///
  /// Panics if a timer has to be armed, no runtime was given via [`Deadline::with_runtime`], and
  /// the caller is not running inside a tokio runtime.
  pub fn set(&self, deadline: Option<Instant>) {
    let mut inner = self.inner.lock();
    self.set_locked(&mut inner, deadline);
  }

  fn set_locked(&self, inner: &mut Inner, deadline: Option<Instant>) {
    inner.disarm();
    inner.expires_at = None;

    let at = match deadline {
      None => {
        inner.renew_signal_if_fired();
        return;
      }
      Some(at) => at,
    };

    if at <= Instant::now() {
      inner.expires_at = deadline;
      inner.signal.fire();
      return;
    }

    inner.renew_signal_if_fired();
    let generation = inner.next_generation;
    inner.next_generation += 1;
    let task = Self::expire_at(Arc::downgrade(&self.inner), generation, at);
    let handle = match &self.runtime {
      Some(runtime) => runtime.spawn(task),
      None => tokio::spawn(task),
    };
    tracing::debug!("Deadline::set: armed timer generation={}", generation);
    inner.timer = Some(ArmedTimer { generation, handle });
    inner.expires_at = deadline;
  }

  /// Returns the signal of the current epoch.
  ///
  /// Calls with no intervening [`Deadline::set`] return the same identity.
  pub fn wait(&self) -> DeadlineSignal {
    self.inner.lock().signal.clone()
  }

  /// Returns the most recently set expiry.
  pub fn deadline(&self) -> Option<Instant> {
    self.inner.lock().expires_at
  }

  /// Returns `true` if the signal of the current epoch has fired.
  pub fn is_expired(&self) -> bool {
    self.wait().is_fired()
  }

  async fn expire_at(inner: Weak<Mutex<Inner>>, generation: u64, at: Instant) {
    tokio::time::sleep_until(at).await;
    let Some(shared) = inner.upgrade() else {
      return;
    };
    let mut inner = shared.lock();
    if inner.timer.as_ref().is_some_and(|timer| timer.generation == generation) {
      inner.timer = None;
      inner.signal.fire();
      tracing::trace!("Deadline: timer generation={} fired", generation);
    } else {
      tracing::trace!("Deadline: stale timer generation={} ignored", generation);
    }
  }

  #[cfg(test)]
  fn armed_generation(&self) -> Option<u64> {
    self.inner.lock().timer.as_ref().map(|timer| timer.generation)
  }
}

impl Default for Deadline {
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for Deadline {
  fn drop(&mut self) {
    self.inner.lock().disarm();
  }
}

impl Debug for Deadline {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.inner.lock();
    f.debug_struct("Deadline")
      .field("expires_at", &inner.expires_at)
      .field("armed", &inner.timer.is_some())
      .field("signal", &inner.signal)
      .finish()
  }
}

static_assertions::assert_impl_all!(Deadline: Send, Sync);
