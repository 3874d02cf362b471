//! Resettable read/write deadlines for connections that have no native timeout support.
//!
//! A [`Deadline`] owns one expiry timer and hands out a [`DeadlineSignal`] that fires once the
//! expiry passes. [`DualDeadline`] pairs a read and a write deadline so that an in-memory or
//! pipe-like connection can offer the same `set_read_deadline` / `set_write_deadline` contract as a
//! socket, and observe the signals from its own `tokio::select!` loops.

mod config;
mod config_option;
mod deadline;
mod deadline_error;
mod dual_deadline;
mod net_deadliner;
mod signal;

pub use self::{
  config::*, config_option::*, deadline::*, deadline_error::*, dual_deadline::*, net_deadliner::*, signal::*,
};

pub mod prelude {
  pub use super::{
    Config, ConfigOption, Deadline, DeadlineError, DeadlineSignal, Direction, DualDeadline, NetDeadliner,
  };
}
