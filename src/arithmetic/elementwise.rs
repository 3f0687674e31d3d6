//! Entry-wise addition and subtraction

use std::collections::HashSet;

use num_traits::{CheckedAdd, CheckedSub};

use crate::arithmetic::Operation;
use crate::error::{Error, Result};
use crate::matrix::{Entries, MatrixConfig, Scalar, SparseMatrix};

/// Combines every coordinate stored in either operand with `op`
fn combine<T, F>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    operation: Operation,
    config: &MatrixConfig,
    op: F,
) -> Result<SparseMatrix<T>>
where
    T: Scalar,
    F: Fn(&T, &T) -> Option<T>,
{
    let (n_rows, n_cols) = operation.check_dimensions(a.dimensions(), b.dimensions())?;

    let keys: HashSet<(usize, usize)> = a
        .entries()
        .keys()
        .chain(b.entries().keys())
        .copied()
        .collect();
    // Sorted so an overflow always reports the smallest coordinate
    let mut keys: Vec<(usize, usize)> = keys.into_iter().collect();
    keys.sort_unstable();

    let mut entries = Entries::with_capacity(keys.len());
    for (row, col) in keys {
        let value = op(&a.get(row, col), &b.get(row, col)).ok_or_else(|| Error::Overflow {
            operation,
            row,
            col,
        })?;

        if config.zero_policy.keeps(&value) {
            entries.insert((row, col), value);
        }
    }

    Ok(SparseMatrix::new(n_rows, n_cols, entries))
}

/// Adds two matrices of equal dimensions with the default config
pub fn add<T: Scalar>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
    add_with(a, b, &MatrixConfig::default())
}

/// Adds two matrices of equal dimensions
///
/// Every coordinate stored in either operand appears in the result unless
/// it sums to zero under [`ZeroPolicy::Prune`](crate::ZeroPolicy::Prune).
pub fn add_with<T: Scalar>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    config: &MatrixConfig,
) -> Result<SparseMatrix<T>> {
    combine(a, b, Operation::Add, config, <T as CheckedAdd>::checked_add)
}

/// Subtracts `b` from `a` with the default config
pub fn subtract<T: Scalar>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
    subtract_with(a, b, &MatrixConfig::default())
}

/// Subtracts `b` from `a`; both must have equal dimensions
pub fn subtract_with<T: Scalar>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    config: &MatrixConfig,
) -> Result<SparseMatrix<T>> {
    combine(a, b, Operation::Subtract, config, <T as CheckedSub>::checked_sub)
}
