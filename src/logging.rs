//! Diagnostic tracing for organizer runs.
//!
//! The library only emits `tracing` events: declarations, skipped steps and
//! invocations at `debug`, unknown capabilities at `warn`. Installing a
//! subscriber is left to the binary, which calls [`init`] once at start-up.
//!
//! The filter directive is chosen in this order:
//! 1. `RUST_LOG`, when set and non-blank
//! 2. the configured `log_level`
//! 3. `warn`
//!
//! Output goes to stderr in the compact format, so it never mixes with the
//! binary's stdout report.

use mockable::{DefaultEnv, Env};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::LoggingError;

/// Directive used when neither `RUST_LOG` nor configuration sets one.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Picks the filter directive from `RUST_LOG` and the configured level.
///
/// Blank values count as unset.
#[must_use]
pub fn resolve_directive<E: Env>(env: &E, configured: Option<&str>) -> String {
    env.string(EnvFilter::DEFAULT_ENV)
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            configured
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}

/// Parses `directive` into an [`EnvFilter`].
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] when the directive is malformed.
pub fn build_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        directive: directive.to_owned(),
        message: e.to_string(),
    })
}

/// Installs the global stderr subscriber.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] for a malformed directive and
/// [`LoggingError::InitFailed`] when a global subscriber already exists.
pub fn init(configured: Option<&str>) -> Result<(), LoggingError> {
    init_with_env(&DefaultEnv::new(), configured)
}

/// Installs the global stderr subscriber, reading `RUST_LOG` through `env`.
///
/// # Errors
///
/// See [`init`].
pub fn init_with_env<E: Env>(env: &E, configured: Option<&str>) -> Result<(), LoggingError> {
    let directive = resolve_directive(env, configured);
    let filter = build_filter(&directive)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()
        .map_err(|e| LoggingError::InitFailed {
            message: e.to_string(),
        })
}
