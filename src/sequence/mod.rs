//! Ordered, append-only storage of declared steps.
//!
//! A [`StepSequence`] is filled during the declaration phase and traversed
//! in insertion order on every run. Declaration order is execution order;
//! nothing is ever removed or reordered.

mod registration;
mod summary;


use std::fmt;

use tracing::debug;

use crate::config::CapabilityPolicy;
use crate::error::Result;
use crate::filter::Capabilities;
use crate::step::{StepList, StepRef};

pub use registration::{FilterKey, StepOptions, StepRegistration};
pub use summary::{RunSummary, SkipReason, StepOutcome, StepStatus};

/// Ordered collection of step registrations for contexts `C` and subject `S`.
pub struct StepSequence<C, S: ?Sized> {
    entries: Vec<StepRegistration<C, S>>,
}

impl<C, S: ?Sized> StepSequence<C, S> {
    /// An empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `step` with `options`.
    ///
    /// An absent step is dropped without error.
    pub fn append(
        &mut self,
        step: impl Into<Option<StepRef<C>>>,
        options: StepOptions<S>,
    ) -> &mut Self {
        match StepRegistration::new(step.into(), options) {
            Some(registration) => self.entries.push(registration),
            None => debug!("dropping absent step from declaration"),
        }
        self
    }

    /// Declares a step inside a declaration block.
    ///
    /// Same as [`append`](Self::append); the name reads as the declaration
    /// DSL: `steps.run(charge_card, StepOptions::new())`.
    pub fn run(
        &mut self,
        step: impl Into<Option<StepRef<C>>>,
        options: StepOptions<S>,
    ) -> &mut Self {
        self.append(step, options)
    }

    /// Appends every step of a flat or nested list, without filters.
    pub fn append_all(&mut self, steps: impl Into<StepList<C>>) -> &mut Self {
        for step in steps.into().flatten() {
            self.append(step, StepOptions::new());
        }
        self
    }

    /// Moves every registration of `other` onto the end of this sequence.
    pub(crate) fn extend_from(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Visits each registration in declaration order.
    pub fn for_each<F>(&self, visitor: F)
    where
        F: FnMut(&StepRegistration<C, S>),
    {
        self.entries.iter().for_each(visitor);
    }

    /// Iterates over the registrations in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, StepRegistration<C, S>> {
        self.entries.iter()
    }

    /// Number of declared steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no step has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the declared steps in order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&str> {
        self.entries.iter().map(StepRegistration::name).collect()
    }
}

impl<C, S: Capabilities + ?Sized> StepSequence<C, S> {
    /// Invokes every registration in order against `subject` and `context`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error unchanged, or
    /// a filter error under [`CapabilityPolicy::Fail`].
    pub fn invoke_all(
        &self,
        subject: &S,
        context: &mut C,
        policy: CapabilityPolicy,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for registration in &self.entries {
            let status = registration.invoke(subject, context, policy)?;
            summary.record(registration.name(), status);
        }
        Ok(summary)
    }
}

impl<C, S: ?Sized> Default for StepSequence<C, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S: ?Sized> Clone for StepSequence<C, S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<C, S: ?Sized> fmt::Debug for StepSequence<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

impl<'a, C, S: ?Sized> IntoIterator for &'a StepSequence<C, S> {
    type Item = &'a StepRegistration<C, S>;
    type IntoIter = std::slice::Iter<'a, StepRegistration<C, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
