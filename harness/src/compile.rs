//! Resolve a day number to its unit and check the unit's tag table.
//!
//! Units are linked into the binary, so "compiling" is resolution plus the
//! checks a build step would report: the unit exists and it tags at least one
//! sub-problem. Suspicious tags are warnings only, since the child-problem
//! count that decides which ordinals matter is not known until the unit is
//! constructed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::catalog::{Catalog, TagInfo};
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::naming::{Identifier, UnitName};

/// Outcome of one compile attempt. Consumed by the caller, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationResult {
    pub success: bool,
    /// In emission order, all severities.
    pub diagnostics: Vec<Diagnostic>,
}

pub struct CompilerInvoker<'a> {
    catalog: &'a Catalog,
    source_root: PathBuf,
}

impl<'a> CompilerInvoker<'a> {
    pub fn new(catalog: &'a Catalog, source_root: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            source_root: source_root.into(),
        }
    }

    #[instrument(skip_all, fields(day = identifier.get()))]
    pub fn compile(&self, identifier: Identifier) -> CompilationResult {
        let name = UnitName::resolve(identifier);
        let source = name.source_path(&self.source_root);
        let mut collector = DiagnosticCollector::new();

        match self.catalog.get(&name) {
            None => collector.report(
                Diagnostic::error(format!(
                    "cannot find source unit {} for {}",
                    source.display(),
                    name.qualified()
                ))
                .with_source(&source),
            ),
            Some(entry) => check_tags(&name, &source, &entry.tags(), &mut collector),
        }

        let success = !collector.has_errors();
        let diagnostics = collector.into_diagnostics();
        debug!(unit = %name, success, diagnostics = diagnostics.len(), "compiled");
        CompilationResult {
            success,
            diagnostics,
        }
    }
}

fn check_tags(
    name: &UnitName,
    source: &Path,
    tags: &[TagInfo],
    collector: &mut DiagnosticCollector,
) {
    if tags.is_empty() {
        collector.report(
            Diagnostic::error(format!("{name} does not tag any sub-problem")).with_source(source),
        );
        return;
    }

    let mut seen: BTreeMap<u32, &TagInfo> = BTreeMap::new();
    for tag in tags {
        let file = Path::new(tag.file);
        if tag.ordinal == 0 {
            collector.warning_at(
                file,
                tag.line,
                format!("{} is tagged as sub-problem 0 and will never run", tag.name),
            );
            continue;
        }
        if let Some(first) = seen.get(&tag.ordinal) {
            collector.warning_at(
                file,
                tag.line,
                format!(
                    "sub-problem {} of {name} is already tagged by {} on line {}",
                    tag.ordinal, first.name, first.line
                ),
            );
            continue;
        }
        seen.insert(tag.ordinal, tag);
    }
}
