//! Pluggable calculation execution.

use crate::error::Result;
use crate::types::Calculation;

/// Produces the result recorded for a calculation.
pub trait ExecutionStrategy: Send + Sync {
    fn execute(&self, calc: &Calculation) -> Result<f64>;
}

/// Computes the calculation directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectExecution;

impl ExecutionStrategy for DirectExecution {
    fn execute(&self, calc: &Calculation) -> Result<f64> {
        calc.result()
    }
}
