//! Conditional filters gating whether a declared step runs.
//!
//! A [`Filter`] is declared once and resolved at run time against the
//! organizer instance (the *subject*). Resolution yields a three-way
//! decision: `Some(true)`, `Some(false)`, or `None` for "no decision". An
//! absent filter never blocks a step on its own.
//!
//! Named filters are looked up through [`Capabilities`], a small interface
//! exposing zero-argument boolean capabilities by name.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::config::CapabilityPolicy;
use crate::error::FilterError;

/// Named zero-argument boolean capabilities exposed by a subject.
///
/// # Example
///
/// ```
/// use stepwise::filter::Capabilities;
///
/// struct Checkout {
///     gift_wrap: bool,
/// }
///
/// impl Capabilities for Checkout {
///     fn capability(&self, name: &str) -> Option<bool> {
///         match name {
///             "gift_wrap" => Some(self.gift_wrap),
///             _ => None,
///         }
///     }
/// }
///
/// let subject = Checkout { gift_wrap: true };
/// assert_eq!(subject.capability("gift_wrap"), Some(true));
/// assert_eq!(subject.capability("express"), None);
/// ```
pub trait Capabilities {
    /// Evaluates the capability registered under `name`.
    ///
    /// Returns `None` when the subject has no capability of that name.
    fn capability(&self, _name: &str) -> Option<bool> {
        None
    }
}

/// A predicate closure evaluated with the subject as its receiver.
pub type Predicate<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// A runtime-evaluated gate attached to a declared step.
pub enum Filter<S: ?Sized> {
    /// No filter was declared.
    Absent,
    /// A closure evaluated against the subject.
    Predicate(Predicate<S>),
    /// The name of a capability looked up on the subject.
    Named(Cow<'static, str>),
}

impl<S: ?Sized> Filter<S> {
    /// Builds a predicate filter from a closure over the subject.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    /// Builds a named-capability filter.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    /// Returns `true` when no filter was declared.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<S: Capabilities + ?Sized> Filter<S> {
    /// Resolves the filter against `subject`.
    ///
    /// Returns `Ok(None)` for an absent filter. A named filter that the
    /// subject does not expose is "no decision" under
    /// [`CapabilityPolicy::Ignore`].
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownCapability`] when a named filter is not
    /// exposed by the subject and `policy` is [`CapabilityPolicy::Fail`].
    pub fn resolve(
        &self,
        subject: &S,
        policy: CapabilityPolicy,
    ) -> Result<Option<bool>, FilterError> {
        match self {
            Self::Absent => Ok(None),
            Self::Predicate(predicate) => Ok(Some(predicate(subject))),
            Self::Named(name) => match subject.capability(name) {
                Some(decision) => Ok(Some(decision)),
                None => unknown_capability::<S>(name, policy),
            },
        }
    }
}

fn unknown_capability<S: ?Sized>(
    name: &str,
    policy: CapabilityPolicy,
) -> Result<Option<bool>, FilterError> {
    let subject = std::any::type_name::<S>();
    match policy {
        CapabilityPolicy::Ignore => {
            warn!(subject, capability = name, "unknown capability, no decision");
            Ok(None)
        }
        CapabilityPolicy::Fail => Err(FilterError::UnknownCapability {
            subject,
            name: name.to_owned(),
        }),
    }
}

impl<S: ?Sized> Default for Filter<S> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<S: ?Sized> Clone for Filter<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Absent => Self::Absent,
            Self::Predicate(predicate) => Self::Predicate(Arc::clone(predicate)),
            Self::Named(name) => Self::Named(name.clone()),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Filter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

impl<S: ?Sized> fmt::Display for Filter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("-"),
            Self::Predicate(_) => f.write_str("<predicate>"),
            Self::Named(name) => write!(f, ":{name}"),
        }
    }
}

impl<S: ?Sized> From<&'static str> for Filter<S> {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl<S: ?Sized> From<String> for Filter<S> {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}
