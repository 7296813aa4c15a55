//! Scenario state for organizer behavioural tests.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use stepwise::config::{CapabilityPolicy, RunSettings};
use stepwise::filter::Capabilities;
use stepwise::organizer::Organizer;
use stepwise::sequence::RunSummary;

/// A filter as written in a scenario.
#[derive(Debug, Clone)]
pub(crate) enum Gate {
    /// A predicate returning a fixed decision.
    Predicate(bool),
    /// A named capability of the subject.
    Capability(String),
}

/// One step declared with its filters.
#[derive(Debug, Clone, Default)]
pub(crate) struct DeclaredStep {
    pub(crate) name: String,
    pub(crate) when: Option<Gate>,
    pub(crate) unless: Option<Gate>,
}

/// One declaration made by a scenario, in order.
#[derive(Debug, Clone)]
pub(crate) enum Declaration {
    /// A single, possibly filtered, step.
    Single(DeclaredStep),
    /// Unfiltered steps given as nested lists.
    Nested(Vec<Vec<String>>),
    /// A step reference that is absent.
    Absent,
}

/// The subject the filters are resolved against.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScenarioSubject {
    pub(crate) capabilities: Vec<(String, bool)>,
}

impl Capabilities for ScenarioSubject {
    fn capability(&self, name: &str) -> Option<bool> {
        self.capabilities
            .iter()
            .find(|(known, _)| known == name)
            .map(|(_, value)| *value)
    }
}

/// An organizer kind backed by the process-wide registry.
///
/// Only one scenario declares steps on it, since its sequence outlives the
/// scenario.
#[derive(Debug, Clone, Default)]
pub(crate) struct RegisteredSubject(pub(crate) ScenarioSubject);

impl Capabilities for RegisteredSubject {
    fn capability(&self, name: &str) -> Option<bool> {
        self.0.capability(name)
    }
}

impl Organizer for RegisteredSubject {
    type Context = Vec<String>;

    fn kind_name() -> &'static str {
        "RegisteredSubject"
    }

    fn settings() -> RunSettings {
        RunSettings {
            seal_on_run: true,
            unknown_capability: CapabilityPolicy::Ignore,
        }
    }
}

/// High-level outcome of a run.
#[derive(Debug, Clone)]
pub(crate) enum RunResult {
    /// The run completed.
    Ok(RunSummary),
    /// The run returned an error.
    Err(String),
}

#[derive(Default, ScenarioState)]
pub(crate) struct OrganizerState {
    pub(crate) declarations: Slot<Vec<Declaration>>,
    pub(crate) subject: Slot<ScenarioSubject>,
    pub(crate) failing_step: Slot<String>,
    pub(crate) policy: Slot<CapabilityPolicy>,
    pub(crate) declared_count: Slot<usize>,
    pub(crate) trail: Slot<Vec<String>>,
    pub(crate) result: Slot<RunResult>,
}

#[fixture]
pub(crate) fn organizer_state() -> OrganizerState {
    let state = OrganizerState::default();
    state.declarations.set(Vec::new());
    state.subject.set(ScenarioSubject::default());
    state.policy.set(CapabilityPolicy::Ignore);
    state
}
