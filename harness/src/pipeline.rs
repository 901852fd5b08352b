//! One run: compile, load, solve, report.
//!
//! A failed compile is reported and the loader is still tried; load and
//! dispatch failures are reported and end the run. None of them change the
//! exit code unless strict mode asks for it.

use std::error::Error as StdError;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::compile::{CompilationResult, CompilerInvoker};
use crate::config::HarnessConfig;
use crate::dispatch::{DispatchError, SolveReport, Status};
use crate::exit_codes;
use crate::input::InputReader;
use crate::load::{LoadError, Loader};
use crate::naming::Identifier;

/// Where the run ended.
#[derive(Debug)]
pub enum Stage {
    Solved(SolveReport),
    LoadFailed(LoadError),
    Aborted(DispatchError),
}

#[derive(Debug)]
pub struct RunOutcome {
    pub compilation: CompilationResult,
    pub stage: Stage,
}

impl RunOutcome {
    /// Compiled cleanly, loaded, and every sub-problem succeeded.
    pub fn is_clean(&self) -> bool {
        self.compilation.success
            && matches!(&self.stage, Stage::Solved(report) if report.all_succeeded())
    }

    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && !self.is_clean() {
            exit_codes::FAILED
        } else {
            exit_codes::OK
        }
    }
}

pub struct Pipeline<'a> {
    catalog: &'a Catalog,
    source_root: PathBuf,
    inputs: &'a dyn InputReader,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        catalog: &'a Catalog,
        config: &HarnessConfig,
        inputs: &'a dyn InputReader,
    ) -> Self {
        Self {
            catalog,
            source_root: config.source_root.clone(),
            inputs,
        }
    }

    /// Run `identifier`, writing answers to `out` and reports to `err`.
    ///
    /// Only a failure to write a report is returned as `Err`.
    #[instrument(skip_all, fields(day = identifier.get()))]
    pub fn run(
        &self,
        identifier: Identifier,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<RunOutcome> {
        let compilation =
            CompilerInvoker::new(self.catalog, &self.source_root).compile(identifier);
        if !compilation.success {
            warn!(
                diagnostics = compilation.diagnostics.len(),
                "compile failed, loading anyway"
            );
            report_diagnostics(&compilation, err)?;
        } else {
            for diagnostic in &compilation.diagnostics {
                debug!(%diagnostic, "compile warning");
            }
        }

        let context = match Loader::new(self.catalog).load(identifier) {
            Ok(context) => context,
            Err(load_err) => {
                writeln!(err, "error: {}", error_chain(&load_err)).context("write load error")?;
                return Ok(RunOutcome {
                    compilation,
                    stage: Stage::LoadFailed(load_err),
                });
            }
        };

        info!(unit = %context.name(), count = context.child_problems().get(), "solving");
        let stage = match context.solve(self.inputs, out) {
            Ok(report) => {
                report_failures(&report, err)?;
                Stage::Solved(report)
            }
            Err(dispatch_err) => {
                writeln!(err, "error: {dispatch_err}").context("write dispatch error")?;
                Stage::Aborted(dispatch_err)
            }
        };

        Ok(RunOutcome { compilation, stage })
    }
}

fn report_diagnostics(compilation: &CompilationResult, err: &mut dyn Write) -> Result<()> {
    for diagnostic in &compilation.diagnostics {
        writeln!(
            err,
            "Error on line {} in {}",
            diagnostic.line_label(),
            diagnostic
        )
        .context("write diagnostic")?;
    }
    Ok(())
}

fn report_failures(report: &SolveReport, err: &mut dyn Write) -> Result<()> {
    for outcome in report.failures() {
        let (verb, detail) = match &outcome.status {
            Status::Failed(message) => ("failed", message),
            Status::Panicked(message) => ("panicked", message),
            Status::Succeeded => continue,
        };
        writeln!(
            err,
            "error: {} sub-problem {} ({}) {}: {}",
            report.unit, outcome.ordinal, outcome.name, verb, detail
        )
        .context("write sub-problem failure")?;
    }
    Ok(())
}

/// `outer: inner: root` rendering of an error and its sources.
fn error_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::contract::{ChildProblems, Solution, SubProblem, SubProblemContext};
    use crate::input::parse_lines;
    use crate::naming::UnitName;
    use crate::sub_problem;
    use crate::test_support::{MemoryInputReader, captured};
    use anyhow::bail;

    /// Two parts over a list of numbers.
    struct Sums {
        count: ChildProblems,
    }

    impl Sums {
        fn total(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            let numbers: Vec<i64> = parse_lines(&cx.read_input_skip_empty_lines()?)?;
            cx.answer(numbers.iter().sum::<i64>())
        }

        fn largest(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            let numbers: Vec<i64> = parse_lines(&cx.read_input_skip_empty_lines()?)?;
            cx.answer(numbers.iter().max().copied().unwrap_or_default())
        }
    }

    impl Solution for Sums {
        fn construct() -> Result<Self> {
            Ok(Self {
                count: ChildProblems::new(2)?,
            })
        }

        fn child_problems(&self) -> ChildProblems {
            self.count
        }

        fn sub_problems() -> Vec<SubProblem<Self>> {
            vec![
                sub_problem!(2 => Self::largest),
                sub_problem!(1 => Self::total),
            ]
        }
    }

    /// Part 2 is tagged but does nothing yet.
    struct Unfinished;

    impl Unfinished {
        fn part1(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            cx.answer("only part 1")
        }

        fn part2(&mut self, _cx: &mut SubProblemContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    impl Solution for Unfinished {
        fn construct() -> Result<Self> {
            Ok(Self)
        }

        fn child_problems(&self) -> ChildProblems {
            ChildProblems::new(2).expect("count")
        }

        fn sub_problems() -> Vec<SubProblem<Self>> {
            vec![
                sub_problem!(1 => Self::part1),
                sub_problem!(2 => Self::part2),
            ]
        }
    }

    /// Declares zero sub-problems.
    struct Hollow;

    impl Hollow {
        fn part1(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            cx.answer("unreachable")
        }
    }

    impl Solution for Hollow {
        fn construct() -> Result<Self> {
            ChildProblems::new(0)?;
            Ok(Self)
        }

        fn child_problems(&self) -> ChildProblems {
            ChildProblems::new(1).expect("count")
        }

        fn sub_problems() -> Vec<SubProblem<Self>> {
            vec![sub_problem!(1 => Self::part1)]
        }
    }

    /// Part 1 fails at runtime.
    struct Partial;

    impl Partial {
        fn part1(&mut self, _cx: &mut SubProblemContext<'_>) -> Result<()> {
            bail!("not implemented")
        }

        fn part2(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            cx.answer("second")
        }
    }

    impl Solution for Partial {
        fn construct() -> Result<Self> {
            Ok(Self)
        }

        fn child_problems(&self) -> ChildProblems {
            ChildProblems::new(2).expect("count")
        }

        fn sub_problems() -> Vec<SubProblem<Self>> {
            vec![
                sub_problem!(1 => Self::part1),
                sub_problem!(2 => Self::part2),
            ]
        }
    }

    struct Gapped;

    impl Solution for Gapped {
        fn construct() -> Result<Self> {
            Ok(Self)
        }

        fn child_problems(&self) -> ChildProblems {
            ChildProblems::new(2).expect("count")
        }

        fn sub_problems() -> Vec<SubProblem<Self>> {
            vec![sub_problem!(2 => Self::part2)]
        }
    }

    impl Gapped {
        fn part2(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            cx.answer("never")
        }
    }

    /// One sub-problem plus a doubly tagged ordinal it never reaches.
    struct Spare;

    impl Spare {
        fn first(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            cx.answer("first")
        }

        fn extra(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
            cx.answer("extra")
        }
    }

    impl Solution for Spare {
        fn construct() -> Result<Self> {
            Ok(Self)
        }

        fn child_problems(&self) -> ChildProblems {
            ChildProblems::new(1).expect("count")
        }

        fn sub_problems() -> Vec<SubProblem<Self>> {
            vec![
                sub_problem!(1 => Self::first),
                sub_problem!(9 => Self::first),
                sub_problem!(9 => Self::extra),
            ]
        }
    }

    fn catalog() -> Catalog {
        catalog! {
            1 => Sums,
            2 => Unfinished,
            3 => Hollow,
            4 => Partial,
            6 => Gapped,
            7 => Spare,
        }
    }

    struct Run {
        outcome: RunOutcome,
        out: String,
        err: String,
    }

    fn run(day: u32) -> Run {
        let catalog = catalog();
        let sums = UnitName::resolve(Identifier::from_static(1));
        let inputs = MemoryInputReader::new().with_input(&sums, &["3", "", "9", "4"]);
        let pipeline = Pipeline::new(&catalog, &HarnessConfig::default(), &inputs);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = pipeline
            .run(Identifier::new(day).expect("id"), &mut out, &mut err)
            .expect("run");
        Run {
            outcome,
            out: captured(&out),
            err: captured(&err),
        }
    }

    #[test]
    fn both_parts_print_in_order() {
        let run = run(1);
        assert_eq!(run.out, "16\n9\n");
        assert_eq!(run.err, "");
        assert!(run.outcome.is_clean());
        assert_eq!(run.outcome.exit_code(true), exit_codes::OK);
    }

    #[test]
    fn empty_second_part_still_completes() {
        let run = run(2);
        assert_eq!(run.out, "only part 1\n");
        assert!(run.outcome.is_clean());
        assert_eq!(run.outcome.exit_code(false), exit_codes::OK);
    }

    #[test]
    fn missing_unit_reports_diagnostic_then_load_error() {
        let run = run(9);
        assert!(!run.outcome.compilation.success);
        assert_eq!(run.outcome.compilation.diagnostics.len(), 1);
        assert!(matches!(
            run.outcome.stage,
            Stage::LoadFailed(LoadError::NotFound { .. })
        ));

        let lines: Vec<&str> = run.err.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error on line ? in solutions/src/day9.rs"));
        assert_eq!(lines[1], "error: unit solutions::Day9 not found");
        assert_eq!(run.out, "");
        assert_eq!(run.outcome.exit_code(false), exit_codes::OK);
        assert_eq!(run.outcome.exit_code(true), exit_codes::FAILED);
    }

    #[test]
    fn zero_child_problems_fails_before_discovery() {
        let run = run(3);
        assert!(run.outcome.compilation.success);
        assert!(matches!(
            run.outcome.stage,
            Stage::LoadFailed(LoadError::Construct { .. })
        ));
        assert_eq!(run.out, "");
        assert!(run.err.contains("at least one sub-problem"));
    }

    #[test]
    fn failing_part_is_reported_and_next_part_runs() {
        let run = run(4);
        assert_eq!(run.out, "second\n");
        assert_eq!(
            run.err,
            "error: Day4 sub-problem 1 (Self::part1) failed: not implemented\n"
        );
        assert!(!run.outcome.is_clean());
        assert_eq!(run.outcome.exit_code(false), exit_codes::OK);
    }

    #[test]
    fn duplicate_tags_beyond_the_count_keep_the_run_clean() {
        let run = run(7);
        assert!(run.outcome.compilation.success);
        assert_eq!(run.outcome.compilation.diagnostics.len(), 1);
        assert_eq!(run.out, "first\n");
        assert_eq!(run.err, "");
        assert!(run.outcome.is_clean());
        assert_eq!(run.outcome.exit_code(true), exit_codes::OK);
    }

    #[test]
    fn missing_ordinal_aborts_with_no_output() {
        let run = run(6);
        assert!(matches!(
            run.outcome.stage,
            Stage::Aborted(DispatchError::NoSubProblem { ordinal: 1, .. })
        ));
        assert_eq!(run.out, "");
        assert_eq!(run.err, "error: Day6 has no entry point for sub-problem 1\n");
    }
}
