use std::{fs, path::Path};

use serde::Deserialize;
use tracing::trace;

use crate::{NodecodeError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// code generation options
    pub codegen: CodegenOptions,
    /// compile every generated source with QuickJS before returning it, defaults to false
    pub verify_syntax: bool,
}

/// Options shaping the generated function source.
///
/// The defaults reproduce the output the host editor expects.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodegenOptions {
    /// module imported as `http` by API request handlers
    pub http_module: String,
    /// module imported as `zen` by every handler
    pub zen_module: String,
    /// first retry delay in milliseconds, doubled on every further retry
    pub backoff_base_ms: u64,
    /// number of intervals an ISO 8601 cycle timer runs before stopping
    pub cycle_iterations: u64,
    /// spacing of the simulated CRON executions in milliseconds
    pub cron_interval_ms: u64,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            http_module: "http".to_string(),
            zen_module: "zen".to_string(),
            backoff_base_ms: 1000,
            cycle_iterations: 3,
            cron_interval_ms: 1000,
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|err| NodecodeError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), err)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        config.validate()?;
        trace!(?config, "config loaded");
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.codegen.http_module.trim().is_empty() || self.codegen.zen_module.trim().is_empty() {
            return Err(NodecodeError::Config("module names must not be empty".to_string()));
        }
        if self.codegen.cycle_iterations == 0 {
            return Err(NodecodeError::Config("cycle_iterations must be at least 1".to_string()));
        }
        Ok(())
    }
}
