//! Organizer kinds: ordered step lists declared once per type and run
//! against a shared context.
//!
//! Every type implementing [`Organizer`] owns exactly one
//! [`StepSequence`], created lazily on first access and shared by all
//! instances and runs of that type. Steps are declared during start-up and
//! then run, in declaration order, on each call to [`Organizer::run`].
//!
//! # Example
//!
//! ```
//! use stepwise::filter::Capabilities;
//! use stepwise::organizer::Organizer;
//! use stepwise::sequence::StepOptions;
//! use stepwise::step::step_fn;
//!
//! #[derive(Default)]
//! struct Order {
//!     log: Vec<&'static str>,
//! }
//!
//! struct PlaceOrder {
//!     gift_wrap: bool,
//! }
//!
//! impl Capabilities for PlaceOrder {
//!     fn capability(&self, name: &str) -> Option<bool> {
//!         (name == "gift_wrap").then_some(self.gift_wrap)
//!     }
//! }
//!
//! impl Organizer for PlaceOrder {
//!     type Context = Order;
//! }
//!
//! # fn main() -> stepwise::error::Result<()> {
//! PlaceOrder::declare_with(|steps| {
//!     steps
//!         .run(
//!             step_fn("charge", |o: &mut Order| {
//!                 o.log.push("charge");
//!                 Ok(())
//!             }),
//!             StepOptions::new(),
//!         )
//!         .run(
//!             step_fn("wrap", |o: &mut Order| {
//!                 o.log.push("wrap");
//!                 Ok(())
//!             }),
//!             StepOptions::new().when_named("gift_wrap"),
//!         );
//! })?;
//!
//! let mut order = Order::default();
//! PlaceOrder { gift_wrap: false }.run(&mut order)?;
//! assert_eq!(order.log, vec!["charge"]);
//! # Ok(())
//! # }
//! ```

mod registry;


use std::sync::Arc;

use tracing::debug;

use crate::config::RunSettings;
use crate::error::Result;
use crate::filter::Capabilities;
use crate::sequence::{RunSummary, StepSequence};
use crate::step::StepList;

pub use registry::{configure, settings};

/// A kind of organizer: a type whose steps are declared once and run in
/// order against [`Organizer::Context`].
///
/// The implementing value is the *subject* of its runs: `if` and `unless`
/// filters are resolved against it through [`Capabilities`].
pub trait Organizer: Capabilities + Sized + Send + Sync + 'static {
    /// State passed mutably to every step of a run.
    type Context: 'static;

    /// Name used in logs and errors.
    #[must_use]
    fn kind_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Settings consulted by [`run`](Self::run) and declarations.
    ///
    /// Defaults to the process-wide settings installed by [`configure`].
    #[must_use]
    fn settings() -> RunSettings {
        registry::settings()
    }

    /// Declares steps for this kind.
    ///
    /// `steps` (a single step, a list, or nested lists) are appended in
    /// flattened order without filters; `block` is then called to append
    /// filtered steps. Repeated calls accumulate.
    ///
    /// The steps are committed together once `block` returns; `block` sees
    /// only steps committed before this call.
    ///
    /// Returns the sequence as declared so far.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Sealed`](crate::error::DeclarationError)
    /// once the kind is sealed.
    fn declare<L, F>(steps: L, block: F) -> Result<Arc<StepSequence<Self::Context, Self>>>
    where
        L: Into<StepList<Self::Context>>,
        F: FnOnce(&mut StepSequence<Self::Context, Self>),
    {
        registry::entry::<Self, Self::Context>().declare(Self::kind_name(), |sequence| {
            sequence.append_all(steps);
            block(sequence);
        })
    }

    /// Declares unfiltered steps.
    ///
    /// # Errors
    ///
    /// See [`declare`](Self::declare).
    fn declare_steps<L>(steps: L) -> Result<Arc<StepSequence<Self::Context, Self>>>
    where
        L: Into<StepList<Self::Context>>,
    {
        Self::declare(steps, |_| {})
    }

    /// Declares steps through a block only.
    ///
    /// # Errors
    ///
    /// See [`declare`](Self::declare).
    fn declare_with<F>(block: F) -> Result<Arc<StepSequence<Self::Context, Self>>>
    where
        F: FnOnce(&mut StepSequence<Self::Context, Self>),
    {
        Self::declare(StepList::empty(), block)
    }

    /// The sequence declared for this kind, empty until the first
    /// declaration.
    #[must_use]
    fn sequence() -> Arc<StepSequence<Self::Context, Self>> {
        registry::entry::<Self, Self::Context>().snapshot()
    }

    /// Ends the declaration phase; later declarations fail.
    fn seal() {
        registry::entry::<Self, Self::Context>().seal(Self::kind_name());
    }

    /// Returns `true` once the kind is sealed.
    #[must_use]
    fn is_sealed() -> bool {
        registry::entry::<Self, Self::Context>().is_sealed()
    }

    /// Runs every declared step in order with `context`.
    ///
    /// Each step runs at most once; a skipped step is recorded in the
    /// summary. When [`RunSettings::seal_on_run`] is set the kind is sealed
    /// before the traversal starts.
    ///
    /// # Errors
    ///
    /// Returns the first step error unchanged and stops the traversal, or a
    /// filter error under
    /// [`CapabilityPolicy::Fail`](crate::config::CapabilityPolicy::Fail).
    fn run(&self, context: &mut Self::Context) -> Result<RunSummary> {
        let run_settings = Self::settings();
        let kind = registry::entry::<Self, Self::Context>();
        if run_settings.seal_on_run {
            kind.seal(Self::kind_name());
        }

        let sequence = kind.snapshot();
        debug!(
            kind = Self::kind_name(),
            steps = sequence.len(),
            "running organizer"
        );
        sequence.invoke_all(self, context, run_settings.unknown_capability)
    }
}
