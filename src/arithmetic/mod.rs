//! Arithmetic over sparse matrices
//!
//! Every operation validates operand dimensions before doing any work and
//! returns a freshly built matrix. Integer arithmetic is checked: overflow
//! is reported as [`Error::Overflow`] instead of wrapping.

pub mod elementwise;
pub mod multiply;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::{MatrixConfig, Scalar, SparseMatrix};

pub use elementwise::{add, add_with, subtract, subtract_with};
pub use multiply::{multiply, multiply_nested_scan, multiply_row_join, multiply_with};

/// Operation selector understood by the command-line driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Entry-wise sum of two equally sized matrices
    Add,
    /// Entry-wise difference `lhs - rhs` of two equally sized matrices
    Subtract,
    /// Matrix product of an m×k and a k×n matrix
    Multiply,
}

impl Operation {
    /// Validates operand dimensions and returns the result dimensions
    ///
    /// Add and subtract need equal dimensions; multiply needs the left
    /// column count to equal the right row count.
    pub fn check_dimensions(
        &self,
        lhs: (usize, usize),
        rhs: (usize, usize),
    ) -> Result<(usize, usize)> {
        let compatible = match self {
            Operation::Add | Operation::Subtract => lhs == rhs,
            Operation::Multiply => lhs.1 == rhs.0,
        };

        if !compatible {
            return Err(Error::DimensionMismatch {
                operation: *self,
                lhs,
                rhs,
            });
        }

        Ok(match self {
            Operation::Add | Operation::Subtract => lhs,
            Operation::Multiply => (lhs.0, rhs.1),
        })
    }

    /// Runs the operation on two matrices
    pub fn apply<T: Scalar>(
        &self,
        a: &SparseMatrix<T>,
        b: &SparseMatrix<T>,
        config: &MatrixConfig,
    ) -> Result<SparseMatrix<T>> {
        match self {
            Operation::Add => add_with(a, b, config),
            Operation::Subtract => subtract_with(a, b, config),
            Operation::Multiply => multiply_with(a, b, config),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Parses an operation name, ignoring case and surrounding whitespace
    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            _ => Err(Error::UnknownOperation(name.trim().to_string())),
        }
    }
}
