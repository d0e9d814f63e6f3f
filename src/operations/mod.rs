//! Binary arithmetic operations.
//!
//! Operations form a closed set looked up by short name through the
//! [`OperationRegistry`]. Each one is a pure function of two `f64`
//! operands that either yields a real result or reports why it cannot.

mod arithmetic;
mod registry;

pub use arithmetic::Operation;
pub use registry::OperationRegistry;
