//! Test-only helpers: in-memory inputs and captured output.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::input::InputReader;
use crate::naming::UnitName;

/// Input reader backed by a map of unit name to lines.
#[derive(Debug, Default, Clone)]
pub struct MemoryInputReader {
    inputs: HashMap<String, Vec<String>>,
}

impl MemoryInputReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, unit: &UnitName, lines: &[&str]) -> Self {
        self.inputs.insert(
            unit.simple().to_string(),
            lines.iter().map(|line| line.to_string()).collect(),
        );
        self
    }
}

impl InputReader for MemoryInputReader {
    fn read_lines(&self, unit: &UnitName) -> Result<Vec<String>> {
        self.inputs
            .get(unit.simple())
            .cloned()
            .ok_or_else(|| anyhow!("no input registered for {unit}"))
    }
}

/// Captured output bytes as text.
pub fn captured(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Temporary working directory with an `inputs/` folder.
pub struct TestWorkspace {
    temp: tempfile::TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        fs::create_dir_all(temp.path().join("inputs")).context("create inputs dir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `inputs/<file>` with the given contents.
    pub fn write_input(&self, file: &str, contents: &str) -> Result<()> {
        let path = self.temp.path().join("inputs").join(file);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Write a file relative to the workspace root.
    pub fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.temp.path().join(relative);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }
}
