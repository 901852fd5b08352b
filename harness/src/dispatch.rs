//! Ordinal dispatch for a constructed unit.
//!
//! `solve` walks `Discovering → Validating → Invoking(1..=N) → Done`. A gap or
//! duplicate in `1..=N` aborts during `Validating`, before any entry point runs.
//! Once invoking, a failing entry point is logged and recorded, and the next
//! ordinal still runs.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use tracing::{debug, error, warn};

use crate::contract::{Solution, SolveEnv, SubProblem, SubProblemContext};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("{unit} has no entry point for sub-problem {ordinal}")]
    NoSubProblem { unit: String, ordinal: u32 },
    #[error("{unit} tags sub-problem {ordinal} more than once ({first} and {second})")]
    DuplicateSubProblem {
        unit: String,
        ordinal: u32,
        first: &'static str,
        second: &'static str,
    },
}

/// Stage of a `solve` call, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Discovering,
    Validating,
    Invoking(u32),
    Done,
    Aborted,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchState::Discovering => f.write_str("discovering"),
            DispatchState::Validating => f.write_str("validating"),
            DispatchState::Invoking(ordinal) => write!(f, "invoking({ordinal})"),
            DispatchState::Done => f.write_str("done"),
            DispatchState::Aborted => f.write_str("aborted"),
        }
    }
}

/// Result of one entry point invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Succeeded,
    Failed(String),
    Panicked(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProblemOutcome {
    pub ordinal: u32,
    pub name: &'static str,
    pub status: Status,
}

impl SubProblemOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == Status::Succeeded
    }
}

/// Every sub-problem attempted by one `solve` call, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub unit: String,
    pub outcomes: Vec<SubProblemOutcome>,
}

impl SolveReport {
    pub fn failures(&self) -> impl Iterator<Item = &SubProblemOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Ordinal-keyed view over a unit's registrations, out-of-range ones included.
pub struct DispatchTable<S> {
    by_ordinal: BTreeMap<u32, Vec<SubProblem<S>>>,
}

impl<S> DispatchTable<S> {
    pub fn discover(registrations: Vec<SubProblem<S>>) -> Self {
        let mut by_ordinal: BTreeMap<u32, Vec<SubProblem<S>>> = BTreeMap::new();
        for registration in registrations {
            by_ordinal
                .entry(registration.ordinal)
                .or_default()
                .push(registration);
        }
        Self { by_ordinal }
    }

    /// Entry points for `1..=count` in ascending order.
    ///
    /// Fails on the smallest ordinal that is missing or tagged twice. Ordinals
    /// outside the range are ignored.
    pub fn validate(
        &self,
        unit: &str,
        count: u32,
    ) -> Result<Vec<SubProblem<S>>, DispatchError> {
        for (&ordinal, registrations) in &self.by_ordinal {
            if ordinal == 0 || ordinal > count {
                for registration in registrations {
                    warn!(
                        unit,
                        ordinal,
                        entry = registration.name,
                        count,
                        "ignoring sub-problem outside declared range"
                    );
                }
            }
        }

        let mut plan = Vec::with_capacity(count as usize);
        for ordinal in 1..=count {
            match self.by_ordinal.get(&ordinal).map(Vec::as_slice) {
                None | Some([]) => {
                    return Err(DispatchError::NoSubProblem {
                        unit: unit.to_string(),
                        ordinal,
                    });
                }
                Some([only]) => plan.push(*only),
                Some([first, second, ..]) => {
                    return Err(DispatchError::DuplicateSubProblem {
                        unit: unit.to_string(),
                        ordinal,
                        first: first.name,
                        second: second.name,
                    });
                }
            }
        }
        Ok(plan)
    }
}

/// Run every sub-problem of `unit` in ascending ordinal order.
pub fn solve<S: Solution>(
    unit: &mut S,
    env: &mut SolveEnv<'_>,
) -> Result<SolveReport, DispatchError> {
    let name = env.unit.simple().to_string();
    let count = Solution::child_problems(unit).get();

    transition(&name, DispatchState::Discovering);
    let table = DispatchTable::discover(S::sub_problems());

    transition(&name, DispatchState::Validating);
    let plan = match table.validate(&name, count) {
        Ok(plan) => plan,
        Err(err) => {
            transition(&name, DispatchState::Aborted);
            return Err(err);
        }
    };

    let mut outcomes = Vec::with_capacity(plan.len());
    for sub_problem in plan {
        transition(&name, DispatchState::Invoking(sub_problem.ordinal));
        let status = invoke(unit, &sub_problem, env);
        match &status {
            Status::Succeeded => {}
            Status::Failed(message) => {
                error!(
                    unit = %name,
                    ordinal = sub_problem.ordinal,
                    entry = sub_problem.name,
                    error = %message,
                    "sub-problem failed"
                );
            }
            Status::Panicked(message) => {
                error!(
                    unit = %name,
                    ordinal = sub_problem.ordinal,
                    entry = sub_problem.name,
                    panic = %message,
                    "sub-problem panicked"
                );
            }
        }
        outcomes.push(SubProblemOutcome {
            ordinal: sub_problem.ordinal,
            name: sub_problem.name,
            status,
        });
    }

    transition(&name, DispatchState::Done);
    Ok(SolveReport {
        unit: name,
        outcomes,
    })
}

fn invoke<S>(unit: &mut S, sub_problem: &SubProblem<S>, env: &mut SolveEnv<'_>) -> Status {
    let started = Instant::now();
    let mut cx =
        SubProblemContext::new(env.unit, env.inputs, &mut *env.out, sub_problem.ordinal);
    let result = catch_unwind(AssertUnwindSafe(|| (sub_problem.run)(unit, &mut cx)));
    debug!(
        ordinal = sub_problem.ordinal,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sub-problem returned"
    );
    match result {
        Ok(Ok(())) => Status::Succeeded,
        Ok(Err(err)) => Status::Failed(format!("{err:#}")),
        Err(payload) => Status::Panicked(panic_message(payload.as_ref())),
    }
}

fn transition(unit: &str, state: DispatchState) {
    debug!(unit, state = %state, "dispatch");
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
