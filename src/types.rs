//! Core types for calculations and history rows.

use crate::error::Result;
use crate::operations::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel line shown for an empty history.
pub const EMPTY_HISTORY_LINE: &str = "(no history)";

/// Format a float in its natural form, always keeping a fractional part
/// for integral values (`2.0`, never `2`).
///
/// Very large and very small magnitudes switch to exponent form with no
/// sign or zero padding on the exponent (`1e16`, `1e-5`). The text always
/// parses back to the same value.
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

/// An operation applied to two operands.
///
/// The result is computed on demand and never cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calculation {
    pub operation: Operation,
    pub a: f64,
    pub b: f64,
}

impl Calculation {
    pub fn new(operation: Operation, a: f64, b: f64) -> Self {
        Self { operation, a, b }
    }

    /// Compute the result. Arithmetic errors are returned unchanged.
    pub fn result(&self) -> Result<f64> {
        self.operation.compute(self.a, self.b)
    }

    /// `"<op> <a> <b> = <result>"`.
    pub fn format(&self) -> Result<String> {
        let result = self.result()?;
        Ok(format_line(self.operation.name(), self.a, self.b, result))
    }

    /// History row for this calculation with an already computed result.
    pub fn entry(&self, result: f64) -> HistoryEntry {
        HistoryEntry {
            operation: self.operation.name().to_string(),
            a: self.a,
            b: self.b,
            result,
        }
    }
}

/// A single row of history.
///
/// Rows built from a [`Calculation`] carry its computed result; rows read
/// back from disk carry whatever result was stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub operation: String,
    pub a: f64,
    pub b: f64,
    pub result: f64,
}

impl HistoryEntry {
    /// Compute `calc` and wrap it as a row.
    pub fn from_calculation(calc: &Calculation) -> Result<Self> {
        Ok(calc.entry(calc.result()?))
    }

    /// `"<op> <a> <b> = <result>"`.
    pub fn format(&self) -> String {
        format_line(&self.operation, self.a, self.b, self.result)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

fn format_line(operation: &str, a: f64, b: f64, result: f64) -> String {
    format!(
        "{} {} {} = {}",
        operation,
        format_number(a),
        format_number(b),
        format_number(result)
    )
}
