//! Coordinate-keyed sparse matrix

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::matrix::Scalar;

/// Mapping from `(row, col)` to stored value
pub type Entries<T> = HashMap<(usize, usize), T>;

/// A sparse matrix storing only explicitly present entries
///
/// Entries are keyed by `(row, col)`; any coordinate without a stored
/// value reads as zero. Stored zeros are allowed. Dimensions and entries
/// are fixed once the matrix is built: arithmetic always produces a new
/// matrix.
///
/// The lenient constructors do not check that keys fall inside the
/// declared dimensions. Use [`SparseMatrix::try_new`] or
/// [`SparseMatrix::check_bounds`] when that invariant must hold.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrix<T = i64> {
    n_rows: usize,
    n_cols: usize,
    entries: Entries<T>,
}

impl<T: Scalar> SparseMatrix<T> {
    /// Creates a matrix from explicit dimensions and entries without
    /// checking indices against the dimensions
    pub fn new(n_rows: usize, n_cols: usize, entries: Entries<T>) -> Self {
        Self {
            n_rows,
            n_cols,
            entries,
        }
    }

    /// Creates a matrix, failing if any entry lies outside the dimensions
    pub fn try_new(n_rows: usize, n_cols: usize, entries: Entries<T>) -> Result<Self> {
        let matrix = Self::new(n_rows, n_cols, entries);
        matrix.check_bounds()?;
        Ok(matrix)
    }

    /// Creates a matrix with no stored entries
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::new(n_rows, n_cols, HashMap::new())
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let entries = (0..n).map(|i| ((i, i), T::one())).collect();
        Self::new(n, n, entries)
    }

    /// Builds a matrix from `(row, col, value)` triplets
    ///
    /// A later triplet for the same coordinate replaces an earlier one.
    pub fn from_triplets<I>(n_rows: usize, n_cols: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let entries = triplets
            .into_iter()
            .map(|(row, col, value)| ((row, col), value))
            .collect();
        Self::new(n_rows, n_cols, entries)
    }

    /// Returns `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Declared row count
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Declared column count
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns the stored value at `(row, col)`, or zero when absent
    ///
    /// Out-of-range coordinates also read as zero.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.entries.get(&(row, col)).copied().unwrap_or_else(T::zero)
    }

    /// Number of stored entries, including stored zeros
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// The stored entry mapping
    pub fn entries(&self) -> &Entries<T> {
        &self.entries
    }

    /// Iterates stored entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), T)> + '_ {
        self.entries.iter().map(|(&key, &value)| (key, value))
    }

    /// Stored entries sorted by row, then column
    pub fn sorted_entries(&self) -> Vec<((usize, usize), T)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_unstable_by_key(|&(key, _)| key);
        sorted
    }

    /// Checks that every stored key lies inside the dimensions
    ///
    /// Reports the smallest offending coordinate in (row, col) order.
    pub fn check_bounds(&self) -> Result<()> {
        let offender = self
            .entries
            .keys()
            .filter(|&&(row, col)| row >= self.n_rows || col >= self.n_cols)
            .min();

        match offender {
            Some(&(row, col)) => Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.n_rows,
                cols: self.n_cols,
            }),
            None => Ok(()),
        }
    }

    /// Returns a copy without stored zeros
    pub fn pruned(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(&key, &value)| (key, value))
            .collect();
        Self::new(self.n_rows, self.n_cols, entries)
    }

    /// Splits the matrix into its entry mapping and dimensions
    pub fn into_parts(self) -> (Entries<T>, (usize, usize)) {
        (self.entries, (self.n_rows, self.n_cols))
    }
}

impl<T: Scalar> fmt::Debug for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let sorted = self.sorted_entries();
        let max_entries = 8.min(sorted.len());

        if max_entries > 0 {
            write!(f, "  entries: ")?;
            for ((row, col), value) in &sorted[..max_entries] {
                write!(f, "({}, {}, {:?}) ", row, col, value)?;
            }
            if sorted.len() > max_entries {
                write!(f, "... ({} more)", sorted.len() - max_entries)?;
            }
            writeln!(f)?;
        }

        write!(f, "}}")
    }
}
