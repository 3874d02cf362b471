use crate::config_option::ConfigOption;
use crate::deadline_error::Direction;
use std::time::Duration;
use tokio::runtime::Handle;

/// Timeout policy of a connection embedding a [`DualDeadline`](crate::DualDeadline).
#[derive(Debug, Clone, Default)]
pub struct Config {
  pub read_timeout: Option<Duration>,
  pub write_timeout: Option<Duration>,
  /// Runtime the deadline timers are spawned on. `None` uses the runtime current at `set` time.
  pub runtime: Option<Handle>,
}

impl Config {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn timeout(&self, direction: Direction) -> Option<Duration> {
    match direction {
      Direction::Read => self.read_timeout,
      Direction::Write => self.write_timeout,
    }
  }
}
