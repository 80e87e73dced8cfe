use tokio::runtime::Handle;

use crate::Config;

#[derive(Debug, Clone)]
pub enum ConfigOption {
  SetRuntime(Handle),
  SetName(String),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::SetRuntime(runtime) => {
        config.runtime = Some(runtime.clone());
      }
      ConfigOption::SetName(name) => {
        config.name = Some(name.clone());
      }
    }
  }

  pub fn with_runtime(runtime: Handle) -> ConfigOption {
    ConfigOption::SetRuntime(runtime)
  }

  pub fn with_name(name: impl Into<String>) -> ConfigOption {
    ConfigOption::SetName(name.into())
  }
}
