use crate::deadline_error::DeadlineError;
use tokio::time::Instant;

/// Socket-like deadline contract.
///
/// `None` clears a deadline. Implementations backed by [`DualDeadline`](crate::DualDeadline) never
/// fail; the `Result` keeps the signature interchangeable with connections that can.
pub trait NetDeadliner {
  fn set_deadline(&self, deadline: Option<Instant>) -> Result<(), DeadlineError>;
  fn set_read_deadline(&self, deadline: Option<Instant>) -> Result<(), DeadlineError>;
  fn set_write_deadline(&self, deadline: Option<Instant>) -> Result<(), DeadlineError>;
}

static_assertions::assert_obj_safe!(NetDeadliner);
