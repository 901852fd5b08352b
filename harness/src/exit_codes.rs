//! Stable exit codes for the `aoc` binary.

/// Run completed. Failed stages are reported on stderr but do not change the code.
pub const OK: i32 = 0;
/// Missing, non-numeric or non-positive day argument.
pub const USAGE: i32 = 1;
/// Configuration could not be loaded.
pub const INVALID: i32 = 1;
/// `--strict` run where compilation, loading or a sub-problem failed.
pub const FAILED: i32 = 2;
