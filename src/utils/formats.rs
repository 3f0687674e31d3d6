//! Conversions between SparseMatrix and external matrix libraries

use crate::error::{Error, Result};
use crate::matrix::{Scalar, SparseMatrix};
use ndarray::Array2;
use sprs::CsMat;

/// Converts a matrix to sprs CsMat in CSR layout
///
/// Stored zeros are carried over as explicit entries. Fails if an entry
/// lies outside the matrix dimensions.
pub fn to_sprs<T>(matrix: &SparseMatrix<T>) -> Result<CsMat<T>>
where
    T: Scalar + Default,
{
    matrix.check_bounds()?;

    let (n_rows, n_cols) = matrix.dimensions();
    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    let mut col_idx = Vec::with_capacity(matrix.nnz());
    let mut values = Vec::with_capacity(matrix.nnz());

    row_ptr.push(0);
    let mut current_row = 0;

    for ((row, col), value) in matrix.sorted_entries() {
        // Close any rows before this entry's row
        while current_row < row {
            row_ptr.push(col_idx.len());
            current_row += 1;
        }
        col_idx.push(col);
        values.push(value);
    }

    while current_row < n_rows {
        row_ptr.push(col_idx.len());
        current_row += 1;
    }

    Ok(CsMat::new((n_rows, n_cols), row_ptr, col_idx, values))
}

/// Converts an sprs CsMat (CSR or CSC) to a SparseMatrix
///
/// Every explicitly stored element becomes an entry.
pub fn from_sprs<T>(matrix: CsMat<T>) -> SparseMatrix<T>
where
    T: Scalar + Default,
{
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let triplets = matrix
        .outer_iterator()
        .enumerate()
        .flat_map(|(row, vec)| {
            vec.iter()
                .map(move |(col, &value)| (row, col, value))
                .collect::<Vec<_>>()
        });

    SparseMatrix::from_triplets(n_rows, n_cols, triplets)
}

/// Largest number of cells [`to_dense`] will allocate
pub const MAX_DENSE_CELLS: usize = 1 << 24;

/// Expands a matrix into a dense ndarray
///
/// Fails if an entry lies outside the matrix dimensions, or if
/// `rows * cols` exceeds [`MAX_DENSE_CELLS`].
pub fn to_dense<T: Scalar>(matrix: &SparseMatrix<T>) -> Result<Array2<T>> {
    let (rows, cols) = matrix.dimensions();
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_DENSE_CELLS => {}
        _ => {
            return Err(Error::DenseTooLarge {
                rows,
                cols,
                limit: MAX_DENSE_CELLS,
            })
        }
    }
    matrix.check_bounds()?;

    let mut dense = Array2::zeros(matrix.dimensions());
    for ((row, col), value) in matrix.iter() {
        dense[[row, col]] = value;
    }
    Ok(dense)
}
