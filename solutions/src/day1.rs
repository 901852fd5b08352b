//! Day 1: count how often a depth reading increases.

use anyhow::Result;
use harness::contract::{ChildProblems, Solution, SubProblem, SubProblemContext};
use harness::input::parse_lines;
use harness::sub_problem;

/// Width of the sliding window used by part 2.
const WINDOW: usize = 3;

pub struct Day1 {
    problems: ChildProblems,
}

impl Day1 {
    fn part1(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
        let depths: Vec<i64> = parse_lines(&cx.read_input_skip_empty_lines()?)?;
        cx.answer(count_increases(&depths))
    }

    fn part2(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
        let depths: Vec<i64> = parse_lines(&cx.read_input_skip_empty_lines()?)?;
        let sums: Vec<i64> = depths
            .windows(WINDOW)
            .map(|window| window.iter().sum())
            .collect();
        cx.answer(count_increases(&sums))
    }
}

impl Solution for Day1 {
    fn construct() -> Result<Self> {
        Ok(Self {
            problems: ChildProblems::new(2)?,
        })
    }

    fn child_problems(&self) -> ChildProblems {
        self.problems
    }

    fn sub_problems() -> Vec<SubProblem<Self>> {
        vec![
            sub_problem!(1 => Self::part1),
            sub_problem!(2 => Self::part2),
        ]
    }
}

fn count_increases(values: &[i64]) -> usize {
    values.windows(2).filter(|pair| pair[0] < pair[1]).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness::contract::SolveEnv;
    use harness::dispatch::solve;
    use harness::naming::{Identifier, UnitName};
    use harness::test_support::{MemoryInputReader, captured};

    const SAMPLE: &[&str] = &[
        "199", "200", "208", "210", "200", "207", "240", "269", "260", "263",
    ];

    #[test]
    fn counts_increases() {
        assert_eq!(count_increases(&[1, 2, 2, 3, 1]), 2);
        assert_eq!(count_increases(&[]), 0);
        assert_eq!(count_increases(&[5]), 0);
    }

    #[test]
    fn sample_input() {
        let name = UnitName::resolve(Identifier::from_static(1));
        let inputs = MemoryInputReader::new().with_input(&name, SAMPLE);
        let mut out = Vec::new();
        let mut unit = Day1::construct().expect("construct");
        let report = {
            let mut env = SolveEnv {
                unit: &name,
                inputs: &inputs,
                out: &mut out,
            };
            solve(&mut unit, &mut env).expect("solve")
        };

        assert!(report.all_succeeded());
        assert_eq!(captured(&out), "7\n5\n");
    }
}
