//! Puzzle solutions, one unit per day.
//!
//! Each unit lives in `src/day<N>.rs` and is registered in [`catalog`] under
//! its day number. Inputs are read from `inputs/day<N>.txt`.

pub mod day1;
pub mod day5;

use harness::catalog::Catalog;

/// Every linked solution unit.
pub fn catalog() -> Catalog {
    harness::catalog! {
        1 => day1::Day1,
        5 => day5::Day5,
    }
}
