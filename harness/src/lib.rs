//! Compile-load-dispatch harness for numbered puzzle solutions.
//!
//! A run turns a bare day number into a solution unit and executes its
//! sub-problems in ascending order:
//!
//! - **[`compile`]**: resolve the unit by naming convention and check its
//!   sub-problem table, collecting [`diagnostics`].
//! - **[`load`]**: instantiate the unit from the [`catalog`] inside an
//!   execution context that is released when the run ends.
//! - **[`dispatch`]**: validate the ordinal table against the unit's declared
//!   child-problem count and invoke each entry point once.
//!
//! Units are statically linked; [`contract`] defines what every unit provides.
//! [`pipeline`] strings the stages together and [`cli`] wraps it for the `aoc`
//! binary.

pub mod catalog;
pub mod cli;
pub mod compile;
pub mod config;
pub mod contract;
pub mod diagnostics;
pub mod dispatch;
pub mod exit_codes;
pub mod input;
pub mod load;
pub mod logging;
pub mod naming;
pub mod pipeline;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
