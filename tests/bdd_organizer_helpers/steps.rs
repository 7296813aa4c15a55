//! Given/when steps for organizer scenarios.

use std::sync::Arc;

use rstest_bdd_macros::{given, when};
use stepwise::config::CapabilityPolicy;
use stepwise::error::StepError;
use stepwise::filter::Filter;
use stepwise::organizer::Organizer;
use stepwise::sequence::{RunSummary, StepOptions, StepSequence};
use stepwise::step::{Step, StepList, StepRef};

use super::StepResult;
use super::state::{Declaration, DeclaredStep, Gate, OrganizerState, RegisteredSubject, RunResult};

/// A step that appends its name to the trail, or fails when told to.
struct Recording {
    name: String,
    fails: bool,
}

impl Step<Vec<String>> for Recording {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, trail: &mut Vec<String>) -> Result<(), StepError> {
        if self.fails {
            return Err(StepError::failed(self.name.clone(), "boom"));
        }
        trail.push(self.name.clone());
        Ok(())
    }
}

fn split_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn declare(organizer_state: &OrganizerState, declaration: Declaration) {
    let mut declarations = organizer_state.declarations.get().unwrap_or_default();
    declarations.push(declaration);
    organizer_state.declarations.set(declarations);
}

fn declare_single(
    organizer_state: &OrganizerState,
    name: String,
    when: Option<Gate>,
    unless: Option<Gate>,
) {
    declare(
        organizer_state,
        Declaration::Single(DeclaredStep { name, when, unless }),
    );
}

fn filter<S>(gate: Option<Gate>) -> Filter<S> {
    match gate {
        None => Filter::Absent,
        Some(Gate::Predicate(decision)) => Filter::predicate(move |_| decision),
        Some(Gate::Capability(name)) => Filter::named(name),
    }
}

fn fill<S>(
    sequence: &mut StepSequence<Vec<String>, S>,
    declarations: Vec<Declaration>,
    failing: Option<&str>,
) {
    let recording = |name: String| -> StepRef<Vec<String>> {
        let fails = failing == Some(name.as_str());
        Arc::new(Recording { name, fails })
    };

    for declaration in declarations {
        match declaration {
            Declaration::Single(step) => {
                let options = StepOptions::new()
                    .when(filter(step.when))
                    .unless(filter(step.unless));
                sequence.append(recording(step.name), options);
            }
            Declaration::Nested(lists) => {
                let nested: Vec<StepList<Vec<String>>> = lists
                    .into_iter()
                    .map(|list| {
                        StepList::from(list.into_iter().map(recording).collect::<Vec<_>>())
                    })
                    .collect();
                sequence.append_all(nested);
            }
            Declaration::Absent => {
                sequence.append(None::<StepRef<Vec<String>>>, StepOptions::new());
            }
        }
    }
}

fn record_run(
    organizer_state: &OrganizerState,
    declared: usize,
    trail: Vec<String>,
    result: stepwise::error::Result<RunSummary>,
) {
    organizer_state.declared_count.set(declared);
    organizer_state.trail.set(trail);
    organizer_state.result.set(match result {
        Ok(summary) => RunResult::Ok(summary),
        Err(e) => RunResult::Err(e.to_string()),
    });
}

#[given("the steps {names} are declared")]
fn given_steps_declared(organizer_state: &OrganizerState, names: String) {
    for name in split_names(&names) {
        declare_single(organizer_state, name, None, None);
    }
}

#[given("the nested steps {first} and then {last} are declared")]
fn given_nested_steps_declared(organizer_state: &OrganizerState, first: String, last: String) {
    declare(
        organizer_state,
        Declaration::Nested(vec![split_names(&first), split_names(&last)]),
    );
}

#[given("the steps {names} are declared with an absent step between them")]
fn given_steps_with_absent_step(organizer_state: &OrganizerState, names: String) {
    for (position, name) in split_names(&names).into_iter().enumerate() {
        if position > 0 {
            declare(organizer_state, Declaration::Absent);
        }
        declare_single(organizer_state, name, None, None);
    }
}

#[given("step {name} is declared")]
fn given_step_declared(organizer_state: &OrganizerState, name: String) {
    declare_single(organizer_state, name, None, None);
}

#[given("step {name} is declared if the predicate returns {decision}")]
fn given_step_with_if_predicate(
    organizer_state: &OrganizerState,
    name: String,
    decision: bool,
) {
    declare_single(organizer_state, name, Some(Gate::Predicate(decision)), None);
}

#[given("step {name} is declared if capability {capability}")]
fn given_step_with_if_capability(
    organizer_state: &OrganizerState,
    name: String,
    capability: String,
) {
    declare_single(organizer_state, name, Some(Gate::Capability(capability)), None);
}

#[given("step {name} is declared unless the predicate returns {decision}")]
fn given_step_with_unless_predicate(
    organizer_state: &OrganizerState,
    name: String,
    decision: bool,
) {
    declare_single(organizer_state, name, None, Some(Gate::Predicate(decision)));
}

#[given("step {name} is declared unless capability {capability}")]
fn given_step_with_unless_capability(
    organizer_state: &OrganizerState,
    name: String,
    capability: String,
) {
    declare_single(organizer_state, name, None, Some(Gate::Capability(capability)));
}

#[given("the if predicate of step {name} returns {decision}")]
fn given_if_predicate_of_step(
    organizer_state: &OrganizerState,
    name: String,
    decision: bool,
) -> StepResult<()> {
    let mut declarations = organizer_state.declarations.get().unwrap_or_default();
    let step = declarations
        .iter_mut()
        .rev()
        .find_map(|declaration| match declaration {
            Declaration::Single(step) if step.name == name => Some(step),
            _ => None,
        })
        .ok_or_else(|| format!("step {name} should be declared first"))?;
    step.when = Some(Gate::Predicate(decision));
    organizer_state.declarations.set(declarations);
    Ok(())
}

#[given("step {name} fails")]
fn given_step_fails(organizer_state: &OrganizerState, name: String) {
    organizer_state.failing_step.set(name);
}

#[given("the subject has capability {name} set to {value}")]
fn given_subject_capability(organizer_state: &OrganizerState, name: String, value: bool) {
    let mut subject = organizer_state.subject.get().unwrap_or_default();
    subject.capabilities.push((name, value));
    organizer_state.subject.set(subject);
}

#[given("unknown capabilities fail the run")]
fn given_unknown_capabilities_fail(organizer_state: &OrganizerState) {
    organizer_state.policy.set(CapabilityPolicy::Fail);
}

#[when("the organizer runs")]
fn when_organizer_runs(organizer_state: &OrganizerState) {
    let failing = organizer_state.failing_step.get();
    let mut sequence = StepSequence::new();
    fill(
        &mut sequence,
        organizer_state.declarations.get().unwrap_or_default(),
        failing.as_deref(),
    );
    let subject = organizer_state.subject.get().unwrap_or_default();
    let policy = organizer_state.policy.get().unwrap_or_default();

    let mut trail = Vec::new();
    let result = sequence.invoke_all(&subject, &mut trail, policy);
    record_run(organizer_state, sequence.len(), trail, result);
}

#[when("the registered organizer runs")]
fn when_registered_organizer_runs(organizer_state: &OrganizerState) -> StepResult<()> {
    let failing = organizer_state.failing_step.get();
    let declarations = organizer_state.declarations.get().unwrap_or_default();
    RegisteredSubject::declare_with(|steps| fill(steps, declarations, failing.as_deref()))
        .map_err(|e| format!("declaration should succeed: {e}"))?;

    let subject = RegisteredSubject(organizer_state.subject.get().unwrap_or_default());
    let mut trail = Vec::new();
    let result = subject.run(&mut trail);
    record_run(
        organizer_state,
        RegisteredSubject::sequence().len(),
        trail,
        result,
    );
    Ok(())
}
