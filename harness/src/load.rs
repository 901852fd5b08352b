//! Instantiate a registered unit inside a scoped execution context.

use std::io::Write;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, instrument};

use crate::catalog::Catalog;
use crate::contract::{ChildProblems, SolveEnv, Unit};
use crate::dispatch::{DispatchError, SolveReport, panic_message};
use crate::input::InputReader;
use crate::naming::{Identifier, UnitName};

/// Any failure to produce an instance. Variants exist for reporting only.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unit {qualified} not found")]
    NotFound { qualified: String },
    #[error("constructing {qualified} failed")]
    Construct {
        qualified: String,
        #[source]
        source: anyhow::Error,
    },
}

pub struct Loader<'a> {
    catalog: &'a Catalog,
}

impl<'a> Loader<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    #[instrument(skip_all, fields(day = identifier.get()))]
    pub fn load(&self, identifier: Identifier) -> Result<ExecutionContext, LoadError> {
        let name = UnitName::resolve(identifier);
        let qualified = name.qualified();
        let entry = self
            .catalog
            .get(&name)
            .ok_or_else(|| LoadError::NotFound {
                qualified: qualified.clone(),
            })?;

        let constructed = catch_unwind(AssertUnwindSafe(|| entry.construct()));
        let unit = match constructed {
            Ok(Ok(unit)) => unit,
            Ok(Err(source)) => return Err(LoadError::Construct { qualified, source }),
            Err(payload) => {
                return Err(LoadError::Construct {
                    qualified,
                    source: anyhow::anyhow!(
                        "constructor panicked: {}",
                        panic_message(payload.as_ref())
                    ),
                });
            }
        };

        debug!(unit = %name, "acquired execution context");
        Ok(ExecutionContext { name, unit })
    }
}

/// Owns one constructed unit for the length of a single `solve`.
///
/// Released on drop; `solve` consumes the context so release follows the run
/// on every exit path.
pub struct ExecutionContext {
    name: UnitName,
    unit: Box<dyn Unit>,
}

impl ExecutionContext {
    pub fn name(&self) -> &UnitName {
        &self.name
    }

    pub fn child_problems(&self) -> ChildProblems {
        self.unit.child_problems()
    }

    pub fn solve(
        mut self,
        inputs: &dyn InputReader,
        out: &mut dyn Write,
    ) -> Result<SolveReport, DispatchError> {
        let mut env = SolveEnv {
            unit: &self.name,
            inputs,
            out,
        };
        self.unit.solve(&mut env)
    }
}

impl Drop for ExecutionContext {
    fn drop(&mut self) {
        debug!(unit = %self.name, "released execution context");
    }
}
