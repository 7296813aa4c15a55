//! Configuration data types for stepwise.

use clap::ValueEnum;
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

/// What a run does when a named filter refers to an unknown capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityPolicy {
    /// Treat the filter as "no decision" and log a warning.
    #[default]
    Ignore,
    /// Abort the run with `FilterError::UnknownCapability`.
    Fail,
}

impl CapabilityPolicy {
    /// The policy as written in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Fail => "fail",
        }
    }
}

/// Settings consulted by every organizer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunSettings {
    /// Seal an organizer kind's sequence on its first run, rejecting later
    /// declarations.
    pub seal_on_run: bool,

    /// Handling of named filters the subject does not expose.
    pub unknown_capability: CapabilityPolicy,
}

impl RunSettings {
    /// The settings used when nothing was configured.
    pub const DEFAULT: Self = Self {
        seal_on_run: true,
        unknown_capability: CapabilityPolicy::Ignore,
    };
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Root application configuration.
///
/// Loaded from configuration files, environment variables and command-line
/// arguments. The precedence order (lowest to highest) is: defaults,
/// configuration file, environment variables, command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `STEPWISE_CONFIG_PATH` environment variable
/// 2. `.stepwise.toml` in the current working directory
/// 3. `.stepwise.toml` in the home directory
/// 4. `~/.config/stepwise/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "STEPWISE",
    post_merge_hook,
    discovery(
        app_name = "stepwise",
        env_var = "STEPWISE_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".stepwise.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// Log filter directive (for example `debug` or `stepwise=trace`).
    pub log_level: Option<String>,

    /// Run settings.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub run: RunSettings,
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        // A blank directive means "not configured".
        self.log_level = self
            .log_level
            .take()
            .map(|level| level.trim().to_owned())
            .filter(|level| !level.is_empty());
        Ok(())
    }
}
