use crate::config::Config;
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug, Clone)]
pub enum ConfigOption {
  SetReadTimeout(Duration),
  SetWriteTimeout(Duration),
  SetTimeout(Duration),
  SetRuntime(Handle),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::SetReadTimeout(timeout) => {
        config.read_timeout = Some(*timeout);
      }
      ConfigOption::SetWriteTimeout(timeout) => {
        config.write_timeout = Some(*timeout);
      }
      ConfigOption::SetTimeout(timeout) => {
        config.read_timeout = Some(*timeout);
        config.write_timeout = Some(*timeout);
      }
      ConfigOption::SetRuntime(runtime) => {
        config.runtime = Some(runtime.clone());
      }
    }
  }

  pub fn with_read_timeout(timeout: Duration) -> ConfigOption {
    ConfigOption::SetReadTimeout(timeout)
  }

  pub fn with_write_timeout(timeout: Duration) -> ConfigOption {
    ConfigOption::SetWriteTimeout(timeout)
  }

  pub fn with_timeout(timeout: Duration) -> ConfigOption {
    ConfigOption::SetTimeout(timeout)
  }

  pub fn with_runtime(runtime: Handle) -> ConfigOption {
    ConfigOption::SetRuntime(runtime)
  }
}
