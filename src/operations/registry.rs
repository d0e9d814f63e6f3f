//! Name-based operation lookup.

use super::Operation;
use crate::error::{CalcError, Result};
use crate::types::Calculation;

/// Resolves operation names to [`Operation`]s.
///
/// The set of operations is fixed at construction; the registry is never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct OperationRegistry {
    operations: Vec<Operation>,
}

impl OperationRegistry {
    /// Create a registry holding every built-in operation.
    pub fn new() -> Self {
        Self {
            operations: Operation::ALL.to_vec(),
        }
    }

    /// Supported names, in registration order.
    pub fn supported_names(&self) -> Vec<&'static str> {
        self.operations.iter().map(|op| op.name()).collect()
    }

    /// Look up an operation. Matching ignores case and surrounding whitespace.
    pub fn resolve(&self, name: &str) -> Result<Operation> {
        let wanted = name.trim().to_lowercase();
        self.operations
            .iter()
            .copied()
            .find(|op| op.name() == wanted)
            .ok_or(CalcError::UnknownOperation(wanted))
    }

    /// Build a calculation for `name` applied to `a` and `b`.
    pub fn create(&self, name: &str, a: f64, b: f64) -> Result<Calculation> {
        Ok(Calculation::new(self.resolve(name)?, a, b))
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
