//! Input files for solution units.

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::naming::UnitName;

/// Source of a unit's input lines.
pub trait InputReader {
    /// All lines in file order, blank lines included.
    fn read_lines(&self, unit: &UnitName) -> Result<Vec<String>>;

    /// Same as [`InputReader::read_lines`] with blank lines removed.
    fn read_non_blank_lines(&self, unit: &UnitName) -> Result<Vec<String>> {
        let lines = self.read_lines(unit)?;
        Ok(lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect())
    }
}

/// Reads `<inputs_dir>/day<N>.txt`.
#[derive(Debug, Clone)]
pub struct FsInputReader {
    inputs_dir: PathBuf,
}

impl FsInputReader {
    pub fn new(inputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs_dir: inputs_dir.into(),
        }
    }
}

impl InputReader for FsInputReader {
    fn read_lines(&self, unit: &UnitName) -> Result<Vec<String>> {
        let path = unit.input_path(&self.inputs_dir);
        debug!(unit = %unit, path = %path.display(), "reading input");
        let contents =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}

/// Parse every line with `FromStr`. Errors name the 1-based line number.
pub fn parse_lines<T>(lines: &[String]) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            line.trim()
                .parse::<T>()
                .map_err(|err| anyhow!("line {}: cannot parse '{}': {}", index + 1, line, err))
        })
        .collect()
}
