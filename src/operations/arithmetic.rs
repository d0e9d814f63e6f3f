//! Operation definitions and their numeric edge cases.

use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A built-in binary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Root,
}

impl Operation {
    /// Every operation, in registry order.
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Root,
    ];

    /// Short name used on the command line and in history files.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "sub",
            Operation::Multiply => "mul",
            Operation::Divide => "div",
            Operation::Power => "pow",
            Operation::Root => "root",
        }
    }

    /// Apply the operation to `a` and `b`.
    pub fn compute(self, a: f64, b: f64) -> Result<f64> {
        match self {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero("Cannot divide by zero.".into()));
                }
                Ok(a / b)
            }
            Operation::Power => power(a, b),
            Operation::Root => root(a, b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn power(a: f64, b: f64) -> Result<f64> {
    if a == 0.0 && b < 0.0 {
        return Err(CalcError::DivisionByZero(
            "Cannot raise zero to a negative power.".into(),
        ));
    }

    let value = a.powf(b);

    // powf yields NaN for a negative base with a fractional exponent.
    if value.is_nan() && !a.is_nan() && !b.is_nan() {
        return Err(CalcError::Domain(format!(
            "{} to the power {} is not a real number.",
            a, b
        )));
    }
    if value.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(CalcError::Domain(format!(
            "{} to the power {} is too large.",
            a, b
        )));
    }

    Ok(value)
}

fn root(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero("Cannot take a zeroth root.".into()));
    }
    if a == 0.0 && b < 0.0 {
        return Err(CalcError::DivisionByZero(
            "Cannot take a negative root of zero.".into(),
        ));
    }

    if a < 0.0 {
        if !is_odd_integer(b) {
            return Err(CalcError::Domain(format!(
                "Root {} of negative number {} is not a real number.",
                b, a
            )));
        }
        return Ok(-(-a).powf(1.0 / b));
    }

    Ok(a.powf(1.0 / b))
}

fn is_odd_integer(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0 && (x % 2.0).abs() == 1.0
}
