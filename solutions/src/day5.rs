//! Day 5: count grid points covered by at least two vent lines.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow, bail};
use harness::contract::{ChildProblems, Solution, SubProblem, SubProblemContext};
use harness::sub_problem;
use regex::Regex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Line {
    from: Point,
    to: Point,
}

impl Line {
    fn is_straight(&self) -> bool {
        self.from.x == self.to.x || self.from.y == self.to.y
    }

    fn is_diagonal(&self) -> bool {
        (self.to.x - self.from.x).abs() == (self.to.y - self.from.y).abs()
    }

    /// Every point from `from` to `to`, both ends included.
    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let dx = (self.to.x - self.from.x).signum();
        let dy = (self.to.y - self.from.y).signum();
        let steps = (self.to.x - self.from.x)
            .abs()
            .max((self.to.y - self.from.y).abs());
        (0..=steps).map(move |step| Point {
            x: self.from.x + dx * step,
            y: self.from.y + dy * step,
        })
    }
}

pub struct Day5 {
    problems: ChildProblems,
    pattern: Regex,
}

impl Day5 {
    fn parse(&self, raw: &str) -> Result<Line> {
        let caps = self
            .pattern
            .captures(raw.trim())
            .ok_or_else(|| anyhow!("expected 'x1,y1 -> x2,y2', got '{raw}'"))?;
        let coord = |index: usize| -> Result<i32> {
            caps[index]
                .parse()
                .with_context(|| format!("coordinate {} in '{raw}'", &caps[index]))
        };
        let line = Line {
            from: Point {
                x: coord(1)?,
                y: coord(2)?,
            },
            to: Point {
                x: coord(3)?,
                y: coord(4)?,
            },
        };
        if !line.is_straight() && !line.is_diagonal() {
            bail!("'{raw}' is neither straight nor at 45 degrees");
        }
        Ok(line)
    }

    fn vents(&self, cx: &SubProblemContext<'_>) -> Result<Vec<Line>> {
        let vents = cx
            .read_input_skip_empty_lines()?
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                self.parse(raw)
                    .with_context(|| format!("line {}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(ordinal = cx.ordinal(), vents = vents.len(), "parsed vent lines");
        Ok(vents)
    }

    fn part1(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
        let vents = self.vents(cx)?;
        cx.answer(overlaps(vents.iter().filter(|line| line.is_straight())))
    }

    fn part2(&mut self, cx: &mut SubProblemContext<'_>) -> Result<()> {
        let vents = self.vents(cx)?;
        cx.answer(overlaps(vents.iter()))
    }
}

impl Solution for Day5 {
    fn construct() -> Result<Self> {
        let pattern =
            Regex::new(r"^(\d+),(\d+)\s*->\s*(\d+),(\d+)$").context("compile line pattern")?;
        Ok(Self {
            problems: ChildProblems::new(2)?,
            pattern,
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

/// Number of points covered by two or more lines.
fn overlaps<'a>(lines: impl Iterator<Item = &'a Line>) -> usize {
    let mut covered: HashMap<Point, u32> = HashMap::new();
    for line in lines {
        for point in line.points() {
            *covered.entry(point).or_default() += 1;
        }
    }
    covered.values().filter(|&&count| count >= 2).count()
}
