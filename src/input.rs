//! Operand and command-line input validation.

use crate::error::{CalcError, Result};

/// Split a line on whitespace.
pub fn split_command(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parse two operands.
pub fn parse_two_numbers(a: &str, b: &str) -> Result<(f64, f64)> {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(CalcError::Validation("Inputs must be numbers.".into())),
    }
}
