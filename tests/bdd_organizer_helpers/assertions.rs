//! Assertion helpers for organizer behavioural tests.

use rstest_bdd_macros::then;
use stepwise::error::{DeclarationError, StepwiseError};
use stepwise::organizer::Organizer;
use stepwise::sequence::{SkipReason, StepStatus};
use stepwise::step::StepList;

use super::StepResult;
use super::state::{OrganizerState, RegisteredSubject, RunResult};

fn trail(organizer_state: &OrganizerState) -> StepResult<Vec<String>> {
    organizer_state
        .trail
        .get()
        .ok_or_else(|| String::from("the organizer should have run"))
}

fn error_message(organizer_state: &OrganizerState) -> StepResult<String> {
    match organizer_state.result.get() {
        Some(RunResult::Err(message)) => Ok(message),
        Some(RunResult::Ok(summary)) => {
            Err(format!("expected an error, run completed: {summary:?}"))
        }
        None => Err(String::from("the organizer should have run")),
    }
}

fn skipped_with(
    organizer_state: &OrganizerState,
    name: &str,
    reason: SkipReason,
) -> StepResult<()> {
    let summary = match organizer_state.result.get() {
        Some(RunResult::Ok(summary)) => summary,
        Some(RunResult::Err(message)) => return Err(format!("run failed: {message}")),
        None => return Err(String::from("the organizer should have run")),
    };

    let status = summary
        .outcomes()
        .iter()
        .find(|outcome| outcome.step == name)
        .map(|outcome| outcome.status)
        .ok_or_else(|| format!("step {name} is missing from the summary"))?;

    if status == StepStatus::Skipped(reason) {
        Ok(())
    } else {
        Err(format!(
            "expected step {name} to be skipped ({reason}), got {status:?}"
        ))
    }
}

#[then("the steps ran in order {names}")]
fn steps_ran_in_order(organizer_state: &OrganizerState, names: String) -> StepResult<()> {
    let expected: Vec<String> = names.split(',').map(|name| name.trim().to_owned()).collect();
    let actual = trail(organizer_state)?;
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected:?}, got {actual:?}"))
    }
}

#[then("no steps ran")]
fn no_steps_ran(organizer_state: &OrganizerState) -> StepResult<()> {
    let actual = trail(organizer_state)?;
    if actual.is_empty() {
        Ok(())
    } else {
        Err(format!("expected no steps, got {actual:?}"))
    }
}

#[then("step {name} was skipped by its if filter")]
fn step_skipped_by_if(organizer_state: &OrganizerState, name: String) -> StepResult<()> {
    skipped_with(organizer_state, &name, SkipReason::If)
}

#[then("step {name} was skipped by its unless filter")]
fn step_skipped_by_unless(organizer_state: &OrganizerState, name: String) -> StepResult<()> {
    skipped_with(organizer_state, &name, SkipReason::Unless)
}

#[then("the run fails with {expected}")]
fn run_fails_with(organizer_state: &OrganizerState, expected: String) -> StepResult<()> {
    let message = error_message(organizer_state)?;
    if message == expected {
        Ok(())
    } else {
        Err(format!("expected error '{expected}', got '{message}'"))
    }
}

#[then("the run fails mentioning {fragment}")]
fn run_fails_mentioning(organizer_state: &OrganizerState, fragment: String) -> StepResult<()> {
    let message = error_message(organizer_state)?;
    if message.contains(&fragment) {
        Ok(())
    } else {
        Err(format!("expected error mentioning '{fragment}', got '{message}'"))
    }
}

#[then("the organizer declares {count} steps")]
fn organizer_declares(organizer_state: &OrganizerState, count: usize) -> StepResult<()> {
    let declared = organizer_state
        .declared_count
        .get()
        .ok_or_else(|| String::from("the organizer should have run"))?;
    if declared == count {
        Ok(())
    } else {
        Err(format!("expected {count} declared steps, got {declared}"))
    }
}

#[then("the registered organizer rejects further declarations")]
fn registered_organizer_rejects_declarations() -> StepResult<()> {
    if !RegisteredSubject::is_sealed() {
        return Err(String::from("expected the kind to be sealed by its run"));
    }
    match RegisteredSubject::declare_steps(StepList::empty()) {
        Err(StepwiseError::Declaration(DeclarationError::Sealed { kind })) => {
            if kind == RegisteredSubject::kind_name() {
                Ok(())
            } else {
                Err(format!("sealed error names the wrong kind: {kind}"))
            }
        }
        Err(other) => Err(format!("expected a sealed error, got {other}")),
        Ok(sequence) => Err(format!("declaration was accepted: {sequence:?}")),
    }
}
