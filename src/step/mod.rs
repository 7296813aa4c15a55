//! The single-step execution contract.
//!
//! A step is one unit of work invoked with the shared context of a run. The
//! organizer only relies on [`Step::call`]: it hands the context over and
//! stops the traversal as soon as a step returns an error.
//!
//! Steps are shared through [`StepRef`] so one declaration can serve every
//! run of an organizer kind. [`StepList`] describes the flat or nested lists
//! accepted by the bulk declaration forms.

mod list;


use std::fmt;
use std::sync::Arc;

use crate::error::StepError;

pub use list::StepList;

/// A unit of work invoked with a shared, mutable context.
///
/// Implementations signal failure by returning a [`StepError`], which aborts
/// the remaining steps of the run.
pub trait Step<C>: Send + Sync {
    /// A human-readable name used in logs and run summaries.
    ///
    /// Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Performs the step's work against the context.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] when the step cannot complete. The error is
    /// propagated to the caller of the run unchanged.
    fn call(&self, context: &mut C) -> Result<(), StepError>;
}

/// Shared handle to a declared step.
pub type StepRef<C> = Arc<dyn Step<C>>;

/// A step backed by a named closure.
pub struct FnStep<F> {
    name: &'static str,
    body: F,
}

impl<F> FnStep<F> {
    /// Wraps a closure as a step with the given name.
    #[must_use]
    pub const fn new(name: &'static str, body: F) -> Self {
        Self { name, body }
    }
}

impl<F> fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

impl<C, F> Step<C> for FnStep<F>
where
    F: Fn(&mut C) -> Result<(), StepError> + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, context: &mut C) -> Result<(), StepError> {
        (self.body)(context)
    }
}

/// Builds a shared step from a named closure.
///
/// # Example
///
/// ```
/// use stepwise::step::{Step, StepRef, step_fn};
///
/// let double: StepRef<i64> = step_fn("double", |n: &mut i64| {
///     *n *= 2;
///     Ok(())
/// });
/// let mut value = 21;
/// double.call(&mut value).ok();
/// assert_eq!(value, 42);
/// ```
pub fn step_fn<C, F>(name: &'static str, body: F) -> StepRef<C>
where
    C: 'static,
    F: Fn(&mut C) -> Result<(), StepError> + Send + Sync + 'static,
{
    Arc::new(FnStep::new(name, body))
}
