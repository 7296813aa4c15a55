//! Per-step outcomes collected during a run.

use std::fmt;

/// Why a step was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The `unless` filter resolved to `true`.
    Unless,
    /// The `if` filter resolved to `false`.
    If,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unless => f.write_str("unless filter held"),
            Self::If => f.write_str("if filter did not hold"),
        }
    }
}

/// What happened to one declared step during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step was called with the context.
    Invoked,
    /// A filter kept the step from running.
    Skipped(SkipReason),
}

/// The outcome of one declared step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The step's name.
    pub step: String,
    /// Whether the step ran.
    pub status: StepStatus,
}

/// Ordered outcomes of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    outcomes: Vec<StepOutcome>,
}

impl RunSummary {
    pub(crate) fn record(&mut self, step: &str, status: StepStatus) {
        self.outcomes.push(StepOutcome {
            step: step.to_owned(),
            status,
        });
    }

    /// Every outcome in declaration order.
    #[must_use]
    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    /// Names of the steps that ran, in order.
    #[must_use]
    pub fn invoked(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == StepStatus::Invoked)
            .map(|outcome| outcome.step.as_str())
            .collect()
    }

    /// Names of the skipped steps with the reason, in order.
    #[must_use]
    pub fn skipped(&self) -> Vec<(&str, SkipReason)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome.status {
                StepStatus::Skipped(reason) => Some((outcome.step.as_str(), reason)),
                StepStatus::Invoked => None,
            })
            .collect()
    }

    /// Returns `true` when no step was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
