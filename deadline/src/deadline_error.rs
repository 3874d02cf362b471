use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  Read,
  Write,
}

impl Display for Direction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Direction::Read => write!(f, "read"),
      Direction::Write => write!(f, "write"),
    }
  }
}

/// Reported by a connection when an operation is abandoned because its deadline passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeadlineError {
  #[error("{0} deadline exceeded")]
  Exceeded(Direction),
}

impl DeadlineError {
  pub fn direction(&self) -> Direction {
    match self {
      DeadlineError::Exceeded(direction) => *direction,
    }
  }

  pub fn is_timeout(&self) -> bool {
    matches!(self, DeadlineError::Exceeded(_))
  }
}

static_assertions::assert_impl_all!(DeadlineError: Send, Sync);
