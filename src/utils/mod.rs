//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs, to_dense, to_sprs, MAX_DENSE_CELLS};

use crate::error::Result;
use crate::matrix::{Scalar, SparseMatrix};

/// Renders a matrix as a dense grid, one row per line
///
/// Meant for small matrices; every cell is printed, and matrices above
/// [`MAX_DENSE_CELLS`] cells are rejected.
pub fn dense_grid<T: Scalar>(matrix: &SparseMatrix<T>) -> Result<String> {
    let dense = to_dense(matrix)?;
    let width = dense.iter().map(|v| v.to_string().len()).max().unwrap_or(1);

    let mut grid = String::new();
    for row in dense.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>width$}", v)).collect();
        grid.push_str(&cells.join(" "));
        grid.push('\n');
    }
    Ok(grid)
}
