//! What every solution unit provides to the harness.
//!
//! A unit declares how many sub-problems it has when it is constructed and
//! lists its entry points in a static table built with [`sub_problem!`]. The
//! harness supplies `solve` through the [`Unit`] impl.

use std::fmt::Display;
use std::io::Write;
use std::num::NonZeroU32;

use anyhow::{Context, Result};

use crate::dispatch::{self, DispatchError, SolveReport};
use crate::input::InputReader;
use crate::naming::UnitName;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("solution has to have at least one sub-problem, got {0}")]
    NoChildProblems(u32),
}

/// Number of sub-problems a unit declares. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildProblems(NonZeroU32);

impl ChildProblems {
    pub fn new(count: u32) -> Result<Self, ContractError> {
        NonZeroU32::new(count)
            .map(Self)
            .ok_or(ContractError::NoChildProblems(count))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Entry point signature: the owning instance plus the run context.
pub type EntryPoint<S> = fn(&mut S, &mut SubProblemContext<'_>) -> Result<()>;

/// Registration tying one entry point to an ordinal.
pub struct SubProblem<S> {
    pub ordinal: u32,
    /// Path of the entry point as written at the registration site.
    pub name: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub run: EntryPoint<S>,
}

impl<S> Clone for SubProblem<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SubProblem<S> {}

impl<S> std::fmt::Debug for SubProblem<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubProblem")
            .field("ordinal", &self.ordinal)
            .field("name", &self.name)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish()
    }
}

/// Register `Type::method` as the entry point for an ordinal.
///
/// ```ignore
/// fn sub_problems() -> Vec<SubProblem<Self>> {
///     vec![sub_problem!(1 => Self::part1), sub_problem!(2 => Self::part2)]
/// }
/// ```
#[macro_export]
macro_rules! sub_problem {
    ($ordinal:expr => $method:path) => {
        $crate::contract::SubProblem {
            ordinal: $ordinal,
            name: stringify!($method),
            file: file!(),
            line: line!(),
            run: $method,
        }
    };
}

/// A statically linked solution unit.
pub trait Solution: Sized + 'static {
    /// Zero-argument constructor used by the loader.
    fn construct() -> Result<Self>;

    /// Count fixed at construction.
    fn child_problems(&self) -> ChildProblems;

    /// Every tagged entry point, in any order.
    fn sub_problems() -> Vec<SubProblem<Self>>;
}

/// Type-erased view of a constructed unit.
pub trait Unit {
    fn child_problems(&self) -> ChildProblems;

    fn solve(&mut self, env: &mut SolveEnv<'_>) -> Result<SolveReport, DispatchError>;
}

impl<S: Solution> Unit for S {
    fn child_problems(&self) -> ChildProblems {
        Solution::child_problems(self)
    }

    fn solve(&mut self, env: &mut SolveEnv<'_>) -> Result<SolveReport, DispatchError> {
        dispatch::solve(self, env)
    }
}

/// Collaborators available for one `solve` call.
pub struct SolveEnv<'a> {
    pub unit: &'a UnitName,
    pub inputs: &'a dyn InputReader,
    pub out: &'a mut dyn Write,
}

/// Handed to each entry point while it runs.
pub struct SubProblemContext<'a> {
    unit: &'a UnitName,
    inputs: &'a dyn InputReader,
    out: &'a mut dyn Write,
    ordinal: u32,
}

impl<'a> SubProblemContext<'a> {
    pub fn new(
        unit: &'a UnitName,
        inputs: &'a dyn InputReader,
        out: &'a mut dyn Write,
        ordinal: u32,
    ) -> Self {
        Self {
            unit,
            inputs,
            out,
            ordinal,
        }
    }

    pub fn unit(&self) -> &UnitName {
        self.unit
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn read_input(&self) -> Result<Vec<String>> {
        self.inputs.read_lines(self.unit)
    }

    pub fn read_input_skip_empty_lines(&self) -> Result<Vec<String>> {
        self.inputs.read_non_blank_lines(self.unit)
    }

    /// Write one answer line to the run output.
    pub fn answer(&mut self, value: impl Display) -> Result<()> {
        writeln!(self.out, "{value}").context("write answer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_child_problems_is_rejected() {
        assert_eq!(
            ChildProblems::new(0),
            Err(ContractError::NoChildProblems(0))
        );
        assert_eq!(ChildProblems::new(2).expect("count").get(), 2);
    }

    struct Probe;

    impl Probe {
        fn only(&mut self, _cx: &mut SubProblemContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sub_problem_macro_records_location() {
        let tag: SubProblem<Probe> = sub_problem!(4 => Probe::only);
        assert_eq!(tag.ordinal, 4);
        assert_eq!(tag.name, "Probe::only");
        assert!(tag.file.ends_with("contract.rs"));
        assert!(tag.line > 0);
    }
}
