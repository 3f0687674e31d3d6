//! # sparse_matrix: integer sparse matrices from text files
//!
//! Loads sparse matrices from a small line-oriented text format, checks
//! operand dimensions, and adds, subtracts or multiplies them.
//!
//! ## Overview
//!
//! - [`SparseMatrix`] stores dimensions plus a `(row, col) -> value` map;
//!   anything not stored reads as zero.
//! - [`codec`] parses and writes the text format.
//! - [`arithmetic`] implements addition, subtraction and multiplication,
//!   always building a new matrix.
//! - [`MatrixConfig`] selects the zero policy, multiplication strategy and
//!   bounds checking.
//!
//! ## Usage
//!
//! ```
//! use sparse_matrix::{add, multiply, SparseMatrix};
//!
//! let a: SparseMatrix = "rows=2\ncols=2\n(0, 0, 1)\n(1, 1, 2)".parse().unwrap();
//! let b: SparseMatrix = "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, 4)".parse().unwrap();
//!
//! let sum = add(&a, &b).unwrap();
//! assert_eq!(sum.get(0, 0), 4);
//!
//! let product = multiply(&a, &b).unwrap();
//! assert_eq!(product.to_string(), "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, 4)\n");
//! ```

pub mod arithmetic;
pub mod codec;
pub mod error;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use arithmetic::{
    add, add_with, multiply, multiply_nested_scan, multiply_row_join, multiply_with, subtract,
    subtract_with, Operation,
};
pub use codec::{decode, decode_with, encode, read_matrix, read_matrix_with, write_matrix};
pub use error::{Error, Result};
pub use matrix::{BoundsPolicy, Entries, MatrixConfig, MultiplyStrategy, Scalar, SparseMatrix, ZeroPolicy};
pub use utils::{from_sprs, to_dense, to_sprs, MAX_DENSE_CELLS};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
