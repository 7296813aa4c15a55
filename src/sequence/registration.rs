//! A declared step paired with its `if` / `unless` filters.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::CapabilityPolicy;
use crate::error::Result;
use crate::filter::{Capabilities, Filter};
use crate::step::StepRef;

use super::summary::{SkipReason, StepStatus};

/// The option keys recognised when declaring a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// Run the step only when the filter resolves to `true`.
    If,
    /// Skip the step when the filter resolves to `true`.
    Unless,
}

impl FilterKey {
    /// Parses an option key, returning `None` for unrecognised keys.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "if" => Some(Self::If),
            "unless" => Some(Self::Unless),
            _ => None,
        }
    }

    /// The key as written in a declaration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
        }
    }
}

/// Filters attached to a step at declaration time.
pub struct StepOptions<S: ?Sized> {
    when: Filter<S>,
    unless: Filter<S>,
}

impl<S: ?Sized> StepOptions<S> {
    /// Options with neither filter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            when: Filter::Absent,
            unless: Filter::Absent,
        }
    }

    /// Sets the `if` filter.
    #[must_use]
    pub fn when(mut self, filter: Filter<S>) -> Self {
        self.when = filter;
        self
    }

    /// Sets the `unless` filter.
    #[must_use]
    pub fn unless(mut self, filter: Filter<S>) -> Self {
        self.unless = filter;
        self
    }

    /// Sets the `if` filter to a predicate over the subject.
    #[must_use]
    pub fn when_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.when(Filter::predicate(predicate))
    }

    /// Sets the `unless` filter to a predicate over the subject.
    #[must_use]
    pub fn unless_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.unless(Filter::predicate(predicate))
    }

    /// Sets the `if` filter to a named capability of the subject.
    #[must_use]
    pub fn when_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.when(Filter::named(name))
    }

    /// Sets the `unless` filter to a named capability of the subject.
    #[must_use]
    pub fn unless_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.unless(Filter::named(name))
    }

    /// Builds options from string-keyed entries.
    ///
    /// Only `"if"` and `"unless"` are recognised; other keys are ignored so
    /// declarations can carry options meant for other consumers. A repeated
    /// key keeps its last value.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Filter<S>)>,
        K: AsRef<str>,
    {
        entries
            .into_iter()
            .fold(Self::new(), |options, (key, filter)| {
                match FilterKey::parse(key.as_ref()) {
                    Some(FilterKey::If) => options.when(filter),
                    Some(FilterKey::Unless) => options.unless(filter),
                    None => {
                        debug!(key = key.as_ref(), "ignoring unrecognised step option");
                        options
                    }
                }
            })
    }

    /// The filter stored under `key`.
    #[must_use]
    pub const fn filter(&self, key: FilterKey) -> &Filter<S> {
        match key {
            FilterKey::If => &self.when,
            FilterKey::Unless => &self.unless,
        }
    }
}

impl<S: ?Sized> Default for StepOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for StepOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepOptions")
            .field("if", &self.when)
            .field("unless", &self.unless)
            .finish()
    }
}

/// A step together with the filters deciding whether it runs.
///
/// A registration always wraps a present step: [`StepRegistration::new`]
/// returns `None` for an absent one.
pub struct StepRegistration<C, S: ?Sized> {
    step: StepRef<C>,
    when: Filter<S>,
    unless: Filter<S>,
}

impl<C, S: ?Sized> StepRegistration<C, S> {
    /// Pairs `step` with the filters in `options`.
    ///
    /// Returns `None` when `step` is absent.
    #[must_use]
    pub fn new(step: Option<StepRef<C>>, options: StepOptions<S>) -> Option<Self> {
        let StepOptions { when, unless } = options;
        step.map(|step_ref| Self {
            step: step_ref,
            when,
            unless,
        })
    }

    /// The wrapped step.
    #[must_use]
    pub const fn step(&self) -> &StepRef<C> {
        &self.step
    }

    /// The wrapped step's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.step.name()
    }

    /// The filter declared under `key`.
    #[must_use]
    pub const fn filter(&self, key: FilterKey) -> &Filter<S> {
        match key {
            FilterKey::If => &self.when,
            FilterKey::Unless => &self.unless,
        }
    }
}

impl<C, S: Capabilities + ?Sized> StepRegistration<C, S> {
    /// Evaluates the filters against `subject` and, unless skipped, calls
    /// the step with `context`.
    ///
    /// `unless` is resolved first and short-circuits. `if` only blocks on an
    /// explicit `false`; "no decision" lets the step run.
    ///
    /// # Errors
    ///
    /// Returns the step's own [`StepError`](crate::error::StepError)
    /// unchanged, or a [`FilterError`](crate::error::FilterError) when a
    /// named filter is unknown under [`CapabilityPolicy::Fail`].
    pub fn invoke(
        &self,
        subject: &S,
        context: &mut C,
        policy: CapabilityPolicy,
    ) -> Result<StepStatus> {
        let name = self.name();
        if self.unless.resolve(subject, policy)? == Some(true) {
            debug!(step = name, filter = %self.unless, "skipping step: unless filter holds");
            return Ok(StepStatus::Skipped(SkipReason::Unless));
        }
        if self.when.resolve(subject, policy)? == Some(false) {
            debug!(step = name, filter = %self.when, "skipping step: if filter does not hold");
            return Ok(StepStatus::Skipped(SkipReason::If));
        }

        debug!(step = name, "invoking step");
        self.step.call(context)?;
        Ok(StepStatus::Invoked)
    }
}

impl<C, S: ?Sized> Clone for StepRegistration<C, S> {
    fn clone(&self) -> Self {
        Self {
            step: Arc::clone(&self.step),
            when: self.when.clone(),
            unless: self.unless.clone(),
        }
    }
}

impl<C, S: ?Sized> fmt::Debug for StepRegistration<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRegistration")
            .field("step", &self.name())
            .field("if", &self.when)
            .field("unless", &self.unless)
            .finish()
    }
}
