//! Error types for sparse matrix loading and arithmetic

use crate::arithmetic::Operation;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, validating or combining matrices
#[derive(Error, Debug)]
pub enum Error {
    /// The matrix file does not exist or cannot be opened
    #[error("File not found: {}", .path.display())]
    SourceNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Reading or writing an opened file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed as a directive or a `(row, col, value)` entry
    #[error("Invalid data on line {line_number}: '{line}'")]
    MalformedEntry {
        /// 1-based line number in the source
        line_number: usize,
        /// Offending line, trimmed
        line: String,
    },

    /// Operand dimensions are incompatible with the requested operation
    #[error("Cannot {operation} a {}x{} matrix and a {}x{} matrix", .lhs.0, .lhs.1, .rhs.0, .rhs.1)]
    DimensionMismatch {
        /// Requested operation
        operation: Operation,
        /// Dimensions of the left operand
        lhs: (usize, usize),
        /// Dimensions of the right operand
        rhs: (usize, usize),
    },

    /// The operation name is not one of add, subtract, multiply
    #[error("Unknown operation '{0}': expected add, subtract or multiply")]
    UnknownOperation(String),

    /// An entry lies outside the declared dimensions
    #[error("Entry ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Row index of the entry
        row: usize,
        /// Column index of the entry
        col: usize,
        /// Declared row count
        rows: usize,
        /// Declared column count
        cols: usize,
    },

    /// A dense rendering would need more cells than allowed
    #[error("Cannot expand a {rows}x{cols} matrix densely: limit is {limit} cells")]
    DenseTooLarge {
        /// Declared row count
        rows: usize,
        /// Declared column count
        cols: usize,
        /// Maximum number of cells
        limit: usize,
    },

    /// Integer arithmetic overflowed while computing an entry
    #[error("Integer overflow during {operation} at ({row}, {col})")]
    Overflow {
        /// Operation being computed
        operation: Operation,
        /// Row of the result entry
        row: usize,
        /// Column of the result entry
        col: usize,
    },
}
