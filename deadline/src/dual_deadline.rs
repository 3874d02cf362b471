use std::future::Future;

use tokio::runtime::Handle;
use tokio::time::Instant;

use crate::config::Config;
use crate::deadline::Deadline;
use crate::deadline_error::{DeadlineError, Direction};
use crate::net_deadliner::NetDeadliner;
use crate::signal::DeadlineSignal;


/// Independent read and write deadlines for a connection-like owner.
///
/// Embed it in a connection type to give it `set_read_deadline`, `set_write_deadline` and
/// `set_deadline`, then race [`DualDeadline::read_timeout_signal`] or
/// [`DualDeadline::write_timeout_signal`] against the actual I/O, or use
/// [`DualDeadline::guard_read`] / [`DualDeadline::guard_write`] which do exactly that.
#[derive(Debug, Default)]
pub struct DualDeadline {
  read: Deadline,
  write: Deadline,
}

impl DualDeadline {
  /// Creates both deadlines with no expiry. Timers use the runtime current at `set` time.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates both deadlines with their timers spawned on `runtime`.
  pub fn with_runtime(runtime: Handle) -> Self {
    Self {
      read: Deadline::with_runtime(runtime.clone()),
      write: Deadline::with_runtime(runtime),
    }
  }

  /// Creates both deadlines on the runtime named by `config`, if any.
  pub fn from_config(config: &Config) -> Self {
    Self {
      read: Deadline::with_optional_runtime(config.runtime.clone()),
      write: Deadline::with_optional_runtime(config.runtime.clone()),
    }
  }

  /// Sets, refreshes or clears (`None`) the read deadline.
  pub fn set_read_deadline(&self, deadline: Option<Instant>) {
    self.read.set(deadline);
  }

  /// Sets, refreshes or clears (`None`) the write deadline.
  pub fn set_write_deadline(&self, deadline: Option<Instant>) {
    self.write.set(deadline);
  }

  /// Sets both deadlines to the same expiry.
  pub fn set_deadline(&self, deadline: Option<Instant>) {
    self.read.set(deadline);
    self.write.set(deadline);
  }

  /// Fires once the read deadline passes.
  pub fn read_timeout_signal(&self) -> DeadlineSignal {
    self.read.wait()
  }

  /// Fires once the write deadline passes.
  pub fn write_timeout_signal(&self) -> DeadlineSignal {
    self.write.wait()
  }

  /// The read-direction deadline.
  pub fn read_deadline(&self) -> &Deadline {
    &self.read
  }

  /// The write-direction deadline.
  pub fn write_deadline(&self) -> &Deadline {
    &self.write
  }

  /// Sets the read deadline to now plus the configured read timeout, if there is one.
  ///
  /// A timeout too large to be represented as an instant clears the deadline.
  pub fn arm_read_timeout(&self, config: &Config) {
    if let Some(timeout) = config.timeout(Direction::Read) {
      self.read.set(Instant::now().checked_add(timeout));
    }
  }

  /// Sets the write deadline to now plus the configured write timeout, if there is one.
  ///
  /// A timeout too large to be represented as an instant clears the deadline.
  pub fn arm_write_timeout(&self, config: &Config) {
    if let Some(timeout) = config.timeout(Direction::Write) {
      self.write.set(Instant::now().checked_add(timeout));
    }
  }

  /// Runs `operation` until it completes or the read deadline passes.
  ///
  /// `operation` is not polled at all when the read deadline has already passed.
  pub async fn guard_read<F>(&self, operation: F) -> Result<F::Output, DeadlineError>
  where
    F: Future, {
    guard(self.read_timeout_signal(), Direction::Read, operation).await
  }

  /// Runs `operation` until it completes or the write deadline passes.
  ///
  /// `operation` is not polled at all when the write deadline has already passed.
  pub async fn guard_write<F>(&self, operation: F) -> Result<F::Output, DeadlineError>
  where
    F: Future, {
    guard(self.write_timeout_signal(), Direction::Write, operation).await
  }
}

async fn guard<F>(signal: DeadlineSignal, direction: Direction, operation: F) -> Result<F::Output, DeadlineError>
where
  F: Future, {
  if signal.is_fired() {
    return Err(DeadlineError::Exceeded(direction));
  }
  tokio::select! {
    biased;
    _ = signal.fired() => {
      tracing::debug!("DualDeadline::guard: {} deadline exceeded", direction);
      Err(DeadlineError::Exceeded(direction))
    }
    output = operation => Ok(output),
  }
}

impl NetDeadliner for DualDeadline {
  fn set_deadline(&self, deadline: Option<Instant>) -> Result<(), DeadlineError> {
    DualDeadline::set_deadline(self, deadline);
    Ok(())
  }

  fn set_read_deadline(&self, deadline: Option<Instant>) -> Result<(), DeadlineError> {
    DualDeadline::set_read_deadline(self, deadline);
    Ok(())
  }

  fn set_write_deadline(&self, deadline: Option<Instant>) -> Result<(), DeadlineError> {
    DualDeadline::set_write_deadline(self, deadline);
    Ok(())
  }
}

static_assertions::assert_impl_all!(DualDeadline: Send, Sync, NetDeadliner);
