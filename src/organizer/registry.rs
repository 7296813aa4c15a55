//! Process-wide storage of one step sequence per organizer kind.
//!
//! Entries are keyed by the kind's `TypeId` and created on first access.
//! Each entry holds its sequence behind an `Arc`: declarations copy on
//! write, runs traverse an immutable snapshot.

use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::config::RunSettings;
use crate::error::{DeclarationError, Result};
use crate::sequence::StepSequence;

type ErasedEntry = Arc<dyn Any + Send + Sync>;

static KINDS: Lazy<DashMap<TypeId, ErasedEntry>> = Lazy::new(DashMap::new);

static SETTINGS: Lazy<RwLock<RunSettings>> = Lazy::new(|| RwLock::new(RunSettings::DEFAULT));

/// Declaration state of a single organizer kind.
pub(crate) struct KindEntry<C, S> {
    sequence: RwLock<Arc<StepSequence<C, S>>>,
    sealed: AtomicBool,
}

impl<C, S> KindEntry<C, S> {
    fn new() -> Self {
        Self {
            sequence: RwLock::new(Arc::new(StepSequence::new())),
            sealed: AtomicBool::new(false),
        }
    }

    /// The sequence as currently declared.
    pub(crate) fn snapshot(&self) -> Arc<StepSequence<C, S>> {
        let guard = self.sequence.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Collects the steps added by `declare` and appends them unless the
    /// kind is sealed.
    ///
    /// `declare` fills a scratch sequence with no lock held, so it may read
    /// or declare this kind itself; steps it declares that way land ahead
    /// of its own. A panicking `declare` leaves the sequence untouched.
    /// Runs holding an earlier snapshot keep traversing it unchanged.
    pub(crate) fn declare<F>(
        &self,
        kind: &'static str,
        declare: F,
    ) -> Result<Arc<StepSequence<C, S>>>
    where
        F: FnOnce(&mut StepSequence<C, S>),
    {
        if self.is_sealed() {
            return Err(DeclarationError::Sealed { kind }.into());
        }
        let mut added = StepSequence::new();
        declare(&mut added);

        let mut guard = self.sequence.write().unwrap_or_else(PoisonError::into_inner);
        if self.is_sealed() {
            return Err(DeclarationError::Sealed { kind }.into());
        }
        let count = added.len();
        Arc::make_mut(&mut guard).extend_from(added);
        debug!(kind, added = count, total = guard.len(), "declared steps");
        Ok(Arc::clone(&*guard))
    }

    /// Marks the declaration phase complete.
    pub(crate) fn seal(&self, kind: &'static str) {
        if !self.sealed.swap(true, Ordering::AcqRel) {
            info!(kind, "sealed organizer");
        }
    }

    pub(crate) fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }
}

/// Returns the entry for kind `O`, creating it on first access.
pub(crate) fn entry<O, C>() -> Arc<KindEntry<C, O>>
where
    O: 'static,
    C: 'static,
{
    let key = TypeId::of::<O>();
    let erased = Arc::clone(
        KINDS
            .entry(key)
            .or_insert_with(|| Arc::new(KindEntry::<C, O>::new()) as ErasedEntry)
            .value(),
    );

    // Entries for `O` are only ever created with `O::Context`.
    debug_assert!(
        erased.is::<KindEntry<C, O>>(),
        "registry entry for {} has the wrong context type",
        std::any::type_name::<O>()
    );
    erased
        .downcast::<KindEntry<C, O>>()
        .unwrap_or_else(|_| Arc::new(KindEntry::new()))
}

/// Installs the process-wide run settings.
pub fn configure(settings: RunSettings) {
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = settings;
}

/// The process-wide run settings.
#[must_use]
pub fn settings() -> RunSettings {
    *SETTINGS.read().unwrap_or_else(PoisonError::into_inner)
}
