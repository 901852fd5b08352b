//! Statically linked units, keyed by the name the naming convention derives.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::warn;

use crate::contract::{Solution, Unit};
use crate::naming::{Identifier, UnitName};

/// Static description of one sub-problem registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub ordinal: u32,
    pub name: &'static str,
    pub file: &'static str,
    pub line: u32,
}

/// Type-erased constructor and tag table for a registered unit.
#[derive(Clone)]
pub struct CatalogEntry {
    name: UnitName,
    construct: fn() -> Result<Box<dyn Unit>>,
    describe: fn() -> Vec<TagInfo>,
}

impl CatalogEntry {
    pub fn of<S: Solution>(identifier: Identifier) -> Self {
        Self {
            name: UnitName::resolve(identifier),
            construct: construct_boxed::<S>,
            describe: describe_tags::<S>,
        }
    }

    pub fn name(&self) -> &UnitName {
        &self.name
    }

    /// Run the unit's zero-argument constructor.
    pub fn construct(&self) -> Result<Box<dyn Unit>> {
        (self.construct)()
    }

    pub fn tags(&self) -> Vec<TagInfo> {
        (self.describe)()
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn construct_boxed<S: Solution>() -> Result<Box<dyn Unit>> {
    let unit = S::construct()?;
    Ok(Box::new(unit))
}

fn describe_tags<S: Solution>() -> Vec<TagInfo> {
    S::sub_problems()
        .into_iter()
        .map(|tag| TagInfo {
            ordinal: tag.ordinal,
            name: tag.name,
            file: tag.file,
            line: tag.line,
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<UnitName, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `S` under `identifier`. A second registration for the same
    /// identifier replaces the first.
    pub fn register<S: Solution>(mut self, identifier: Identifier) -> Self {
        let entry = CatalogEntry::of::<S>(identifier);
        if let Some(previous) = self.entries.insert(entry.name.clone(), entry) {
            warn!(unit = %previous.name, "replacing earlier registration");
        }
        self
    }

    pub fn get(&self, name: &UnitName) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Registered identifiers, ascending.
    pub fn identifiers(&self) -> Vec<Identifier> {
        let mut ids: Vec<Identifier> = self.entries.keys().map(UnitName::identifier).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a [`Catalog`] from `day => Type` pairs. Day numbers are checked at
/// compile time.
///
/// ```ignore
/// let catalog = harness::catalog! {
///     1 => day1::Day1,
///     5 => day5::Day5,
/// };
/// ```
#[macro_export]
macro_rules! catalog {
    ($($day:literal => $unit:ty),* $(,)?) => {
        $crate::catalog::Catalog::new()
            $(.register::<$unit>(const { $crate::naming::Identifier::from_static($day) }))*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ChildProblems, SubProblem, SubProblemContext};
    use crate::sub_problem;

    struct Tiny;

    impl Tiny {
        fn part1(&mut self, _cx: &mut SubProblemContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    impl Solution for Tiny {
        fn construct() -> Result<Self> {
            Ok(Self)
        }

        fn child_problems(&self) -> ChildProblems {
            ChildProblems::new(1).expect("count")
        }

        fn sub_problems() -> Vec<SubProblem<Self>> {
            vec![sub_problem!(1 => Self::part1)]
        }
    }

    #[test]
    fn entries_are_keyed_by_conventional_name() {
        let catalog = catalog! { 12 => Tiny, 3 => Tiny };
        assert_eq!(catalog.len(), 2);

        let name = UnitName::resolve(Identifier::from_static(3));
        let entry = catalog.get(&name).expect("registered");
        assert_eq!(entry.name().simple(), "Day3");
        assert_eq!(entry.tags().len(), 1);
        assert_eq!(entry.tags()[0].ordinal, 1);

        let ids: Vec<u32> = catalog.identifiers().into_iter().map(Identifier::get).collect();
        assert_eq!(ids, vec![3, 12]);
    }

    #[test]
    fn construct_returns_a_unit() {
        let catalog = catalog! { 1 => Tiny };
        let name = UnitName::resolve(Identifier::from_static(1));
        let unit = catalog
            .get(&name)
            .expect("registered")
            .construct()
            .expect("construct");
        assert_eq!(unit.child_problems().get(), 1);
    }
}
