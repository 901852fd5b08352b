//! Naming convention tying a day number to its unit, source file and input file.
//!
//! Every name is a pure function of the [`Identifier`]; nothing is searched for.

use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix shared by every unit name (`Day7`).
pub const UNIT_PREFIX: &str = "Day";
/// Namespace the units live under (`solutions::Day7`).
pub const SOLUTIONS_NAMESPACE: &str = "solutions";
/// Extension of unit source files.
pub const SOURCE_EXT: &str = "rs";
/// Extension of unit input files.
pub const INPUT_EXT: &str = "txt";

/// Positive day number selecting a solution unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(NonZeroU32);

impl Identifier {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Const constructor for catalog registrations; a zero fails the build
    /// when evaluated in a `const` block.
    pub const fn from_static(value: u32) -> Self {
        match NonZeroU32::new(value) {
            Some(value) => Self(value),
            None => panic!("identifier must be positive"),
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdentifierError {
    #[error("day must be a number, got '{0}'")]
    NotNumeric(String),
    #[error("day must be positive")]
    NotPositive,
}

impl FromStr for Identifier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') && trimmed[1..].parse::<u32>().is_ok() {
            return Err(ParseIdentifierError::NotPositive);
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|_| ParseIdentifierError::NotNumeric(s.to_string()))?;
        Identifier::new(value).ok_or(ParseIdentifierError::NotPositive)
    }
}

/// Names derived from an identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitName {
    identifier: Identifier,
    simple: String,
}

impl UnitName {
    pub fn resolve(identifier: Identifier) -> Self {
        Self {
            identifier,
            simple: format!("{UNIT_PREFIX}{identifier}"),
        }
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// `Day7`
    pub fn simple(&self) -> &str {
        &self.simple
    }

    /// `solutions::Day7`
    pub fn qualified(&self) -> String {
        format!("{SOLUTIONS_NAMESPACE}::{}", self.simple)
    }

    /// Lowercased simple name shared by the source and input files (`day7`).
    pub fn file_stem(&self) -> String {
        self.simple.to_lowercase()
    }

    pub fn source_path(&self, source_root: &Path) -> PathBuf {
        source_root.join(format!("{}.{SOURCE_EXT}", self.file_stem()))
    }

    pub fn input_path(&self, inputs_dir: &Path) -> PathBuf {
        inputs_dir.join(format!("{}.{INPUT_EXT}", self.file_stem()))
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.simple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_numbers() {
        let id: Identifier = "5".parse().expect("parse");
        assert_eq!(id.get(), 5);
        let id: Identifier = " 12 ".parse().expect("parse");
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn rejects_non_numeric_and_non_positive() {
        assert_eq!(
            "five".parse::<Identifier>(),
            Err(ParseIdentifierError::NotNumeric("five".to_string()))
        );
        assert_eq!(
            "0".parse::<Identifier>(),
            Err(ParseIdentifierError::NotPositive)
        );
        assert_eq!(
            "-3".parse::<Identifier>(),
            Err(ParseIdentifierError::NotPositive)
        );
        assert!("".parse::<Identifier>().is_err());
    }

    #[test]
    fn resolution_is_deterministic() {
        let id = Identifier::from_static(7);
        let first = UnitName::resolve(id);
        let second = UnitName::resolve(id);
        assert_eq!(first, second);
        assert_eq!(first.simple(), "Day7");
        assert_eq!(first.qualified(), "solutions::Day7");
        assert_eq!(
            first.source_path(Path::new("solutions/src")),
            second.source_path(Path::new("solutions/src"))
        );
        assert_eq!(
            first.source_path(Path::new("solutions/src")),
            PathBuf::from("solutions/src/day7.rs")
        );
        assert_eq!(
            first.input_path(Path::new("inputs")),
            PathBuf::from("inputs/day7.txt")
        );
    }
}
