//! Semantic error types for stepwise.
//!
//! Errors the caller might inspect or match on are `thiserror` enums. Opaque
//! reporting (`eyre::Report`) is reserved for the binary boundary.
//!
//! A step signals failure by returning a [`StepError`]. The organizer never
//! catches, retries or rewrites that value: it travels back to the caller
//! inside [`StepwiseError::Step`] exactly as the step produced it.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised by a step to halt the remaining traversal of a run.
#[derive(Debug, Error)]
pub enum StepError {
    /// The step could not complete its work.
    #[error("step '{step}' failed: {message}")]
    Failed {
        /// The name of the failing step.
        step: String,
        /// A description of the failure.
        message: String,
    },

    /// The step failed because of an underlying error.
    #[error("step '{step}' failed")]
    Source {
        /// The name of the failing step.
        step: String,
        /// The error that caused the failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StepError {
    /// Builds a [`StepError::Failed`] from a step name and a message.
    #[must_use]
    pub fn failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the step that failed.
    #[must_use]
    pub fn step(&self) -> &str {
        match self {
            Self::Failed { step, .. } | Self::Source { step, .. } => step,
        }
    }
}

/// Errors that can occur while declaring steps on an organizer kind.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// The kind's declaration phase is complete.
    #[error("organizer '{kind}' is sealed; steps must be declared before it runs")]
    Sealed {
        /// The organizer kind that rejected the declaration.
        kind: &'static str,
    },
}

/// Errors that can occur while resolving a step filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A named filter referred to a capability the subject does not expose.
    #[error("subject '{subject}' has no capability named '{name}'")]
    UnknownCapability {
        /// The type name of the subject.
        subject: &'static str,
        /// The capability name that was looked up.
        name: String,
    },
}

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors that can occur while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {message}")]
    InitFailed {
        /// A description of the failure.
        message: String,
    },
}

/// Top-level error type for stepwise.
///
/// Aggregates every domain error so library calls share one `Result` type.
/// The binary converts it to `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum StepwiseError {
    /// A step failed and halted the run.
    #[error(transparent)]
    Step(#[from] StepError),

    /// A declaration was rejected.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// A filter could not be resolved.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred while setting up logging.
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// A specialised `Result` type for stepwise operations.
pub type Result<T> = std::result::Result<T, StepwiseError>;
