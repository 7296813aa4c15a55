//! Configuration system for stepwise.
//!
//! This module provides the configuration structures and CLI definitions for
//! the stepwise binary and the run settings consulted by every organizer.
//! Loading and precedence merging is handled by the `ortho_config` crate:
//! CLI flags override environment variables, which override configuration
//! files, which override defaults.
//!
//! The configuration file is expected at `~/.config/stepwise/config.toml` by
//! default, or `.stepwise.toml` in the working or home directory.
//!
//! # Example Configuration
//!
//! ```toml
//! log_level = "stepwise=debug"
//!
//! [run]
//! seal_on_run = true
//! unknown_capability = "fail"
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{CheckoutArgs, Cli, Commands};
pub use loader::{env_var_names, load_config, load_config_with_env};
pub use types::{AppConfig, CapabilityPolicy, RunSettings};
