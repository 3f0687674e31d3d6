//! Sparse-by-sparse matrix multiplication
//!
//! Two strategies produce identical results. The nested scan compares every
//! stored entry of A with every stored entry of B and serves as the
//! reference. The row join groups B's entries by row once, so each entry of
//! A only visits the row of B matching its column.

use std::collections::HashMap;

use num_traits::{NumCast, ToPrimitive};

use crate::arithmetic::Operation;
use crate::error::{Error, Result};
use crate::matrix::{Entries, MatrixConfig, MultiplyStrategy, Scalar, SparseMatrix};

/// Exact running sum of `i128` products
///
/// The value is `carry * 2^128 + low`, so additions commute exactly and
/// the final value does not depend on the order products arrive in.
#[derive(Debug, Clone, Copy, Default)]
struct WideSum {
    low: i128,
    carry: i64,
    /// A single product did not fit in `i128`
    poisoned: bool,
}

impl WideSum {
    fn add(&mut self, product: Option<i128>) {
        match product {
            Some(product) => {
                let (low, wrapped) = self.low.overflowing_add(product);
                if wrapped {
                    self.carry += if product > 0 { 1 } else { -1 };
                }
                self.low = low;
            }
            None => self.poisoned = true,
        }
    }

    /// The exact sum when it fits in `i128`
    fn value(&self) -> Option<i128> {
        (!self.poisoned && self.carry == 0).then_some(self.low)
    }
}

/// Accumulates partial products into result coordinates
///
/// Sums are kept wide and only narrowed to `T` once every product is in,
/// so an intermediate sum leaving the range of `T` is not an error.
struct ProductAccumulator {
    sums: HashMap<(usize, usize), WideSum>,
}

impl ProductAccumulator {
    fn new() -> Self {
        Self {
            sums: HashMap::new(),
        }
    }

    /// Adds `a_val * b_val` into `(row, col)`
    fn accumulate<T: Scalar>(&mut self, row: usize, col: usize, a_val: T, b_val: T) {
        let product = a_val
            .to_i128()
            .zip(b_val.to_i128())
            .and_then(|(a, b)| a.checked_mul(b));
        self.sums.entry((row, col)).or_default().add(product);
    }

    /// Narrows every sum to `T`
    ///
    /// If several coordinates overflow, the smallest in (row, col) order is
    /// reported.
    fn finish<T: Scalar>(
        self,
        n_rows: usize,
        n_cols: usize,
        config: &MatrixConfig,
    ) -> Result<SparseMatrix<T>> {
        let mut entries = Entries::with_capacity(self.sums.len());
        let mut overflowed: Option<(usize, usize)> = None;

        for (key, sum) in self.sums {
            match sum.value().and_then(<T as NumCast>::from) {
                Some(value) => {
                    if config.zero_policy.keeps(&value) {
                        entries.insert(key, value);
                    }
                }
                None => overflowed = Some(overflowed.map_or(key, |seen| seen.min(key))),
            }
        }

        if let Some((row, col)) = overflowed {
            return Err(Error::Overflow {
                operation: Operation::Multiply,
                row,
                col,
            });
        }

        Ok(SparseMatrix::new(n_rows, n_cols, entries))
    }
}

/// Multiplies two matrices with the default config
pub fn multiply<T: Scalar>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
    multiply_with(a, b, &MatrixConfig::default())
}

/// Multiplies `a` (m×k) by `b` (k×n), producing an m×n matrix
///
/// A result coordinate is present only if at least one pair of stored
/// entries contributes to it. Whether a coordinate that sums to zero is
/// kept follows the config's zero policy. Overflow is judged on the final
/// value of each coordinate, never on a partial sum.
pub fn multiply_with<T: Scalar>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    config: &MatrixConfig,
) -> Result<SparseMatrix<T>> {
    match config.multiply_strategy {
        MultiplyStrategy::NestedScan => multiply_nested_scan(a, b, config),
        MultiplyStrategy::RowJoin => multiply_row_join(a, b, config),
    }
}

/// Reference multiplication: every stored entry of A against every stored
/// entry of B, O(|A| × |B|)
pub fn multiply_nested_scan<T: Scalar>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    config: &MatrixConfig,
) -> Result<SparseMatrix<T>> {
    let (n_rows, n_cols) = Operation::Multiply.check_dimensions(a.dimensions(), b.dimensions())?;

    let mut accum = ProductAccumulator::new();

    for ((i, k), a_val) in a.iter() {
        for ((j, l), b_val) in b.iter() {
            if k == j {
                accum.accumulate(i, l, a_val, b_val);
            }
        }
    }

    accum.finish(n_rows, n_cols, config)
}

/// Multiplication by hash join on the contracted index
///
/// B's entries are grouped by row; each entry `(i, k)` of A is then
/// paired with the entries in row `k` of B.
pub fn multiply_row_join<T: Scalar>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    config: &MatrixConfig,
) -> Result<SparseMatrix<T>> {
    let (n_rows, n_cols) = Operation::Multiply.check_dimensions(a.dimensions(), b.dimensions())?;

    let mut b_rows: HashMap<usize, Vec<(usize, T)>> = HashMap::new();
    for ((j, l), b_val) in b.iter() {
        b_rows.entry(j).or_default().push((l, b_val));
    }

    let mut accum = ProductAccumulator::new();

    for ((i, k), a_val) in a.iter() {
        if let Some(row) = b_rows.get(&k) {
            for &(l, b_val) in row {
                accum.accumulate(i, l, a_val, b_val);
            }
        }
    }

    accum.finish(n_rows, n_cols, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ZeroPolicy;

    fn strategies() -> Vec<MatrixConfig> {
        [MultiplyStrategy::NestedScan, MultiplyStrategy::RowJoin]
            .into_iter()
            .map(|multiply_strategy| MatrixConfig {
                multiply_strategy,
                ..MatrixConfig::default()
            })
            .collect()
    }

    #[test]
    fn test_reference_multiplication() {
        // A = [1 2; 0 3]
        // B = [4 5; 6 7]
        // C = A*B = [16 19; 18 21]
        let a = SparseMatrix::from_triplets(2, 2, vec![(0, 0, 1), (0, 1, 2), (1, 1, 3)]);
        let b = SparseMatrix::from_triplets(2, 2, vec![(0, 0, 4), (0, 1, 5), (1, 0, 6), (1, 1, 7)]);

        for config in strategies() {
            let result = multiply_with(&a, &b, &config).unwrap();

            assert_eq!(result.dimensions(), (2, 2));
            assert_eq!(result.nnz(), 4);
            assert_eq!(result.get(0, 0), 16);
            assert_eq!(result.get(0, 1), 19);
            assert_eq!(result.get(1, 0), 18);
            assert_eq!(result.get(1, 1), 21);
        }
    }

    #[test]
    fn test_identity_multiplication() {
        let identity = SparseMatrix::<i64>::identity(3);
        let diagonal = SparseMatrix::from_triplets(3, 3, vec![(0, 0, 5), (1, 1, 6), (2, 2, 7)]);

        for config in strategies() {
            let result = multiply_with(&identity, &diagonal, &config).unwrap();
            assert_eq!(result, diagonal);
        }
    }

    #[test]
    fn test_rectangular_dimensions() {
        let a = SparseMatrix::from_triplets(2, 3, vec![(1, 2, 2)]);
        let b = SparseMatrix::from_triplets(3, 4, vec![(2, 3, 5), (0, 0, 9)]);

        let result = multiply(&a, &b).unwrap();
        assert_eq!(result.dimensions(), (2, 4));
        assert_eq!(result.nnz(), 1);
        assert_eq!(result.get(1, 3), 10);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = SparseMatrix::<i64>::zeros(2, 3);
        let b = SparseMatrix::<i64>::zeros(2, 3);

        for config in strategies() {
            assert!(matches!(
                multiply_with(&a, &b, &config),
                Err(Error::DimensionMismatch {
                    operation: Operation::Multiply,
                    lhs: (2, 3),
                    rhs: (2, 3),
                })
            ));
        }
    }

    #[test]
    fn test_cancelling_products() {
        // [1 1] * [1; -1] = [0]
        let a = SparseMatrix::from_triplets(1, 2, vec![(0, 0, 1), (0, 1, 1)]);
        let b = SparseMatrix::from_triplets(2, 1, vec![(0, 0, 1), (1, 0, -1)]);

        let kept = multiply(&a, &b).unwrap();
        assert_eq!(kept.nnz(), 1);
        assert_eq!(kept.get(0, 0), 0);

        let config = MatrixConfig {
            zero_policy: ZeroPolicy::Prune,
            ..MatrixConfig::default()
        };
        assert_eq!(multiply_with(&a, &b, &config).unwrap().nnz(), 0);
    }

    #[test]
    fn test_partial_sums_may_leave_range() {
        // [1 1 1] * [MAX; 1; -1] = [MAX], whichever order the products are summed in
        for _ in 0..200 {
            let a = SparseMatrix::from_triplets(1, 3, vec![(0, 0, 1), (0, 1, 1), (0, 2, 1)]);
            let b = SparseMatrix::from_triplets(3, 1, vec![(0, 0, i64::MAX), (1, 0, 1), (2, 0, -1)]);

            for config in strategies() {
                let result = multiply_with(&a, &b, &config).unwrap();
                assert_eq!(result.nnz(), 1);
                assert_eq!(result.get(0, 0), i64::MAX);
            }
        }
    }

    #[test]
    fn test_negative_extreme_reached_through_cancellation() {
        // MIN * 1 + (-1) * (-1) + (-1) * 1 = MIN
        let a = SparseMatrix::from_triplets(1, 3, vec![(0, 0, i64::MIN), (0, 1, -1), (0, 2, -1)]);
        let b = SparseMatrix::from_triplets(3, 1, vec![(0, 0, 1), (1, 0, -1), (2, 0, 1)]);

        for config in strategies() {
            assert_eq!(multiply_with(&a, &b, &config).unwrap().get(0, 0), i64::MIN);
        }
    }

    #[test]
    fn test_overflow_reports_smallest_coordinate() {
        let a = SparseMatrix::from_triplets(3, 1, vec![(0, 0, 1), (1, 0, i64::MAX), (2, 0, i64::MAX)]);
        let b = SparseMatrix::from_triplets(1, 2, vec![(0, 0, 1), (0, 1, 2)]);

        for config in strategies() {
            assert!(matches!(
                multiply_with(&a, &b, &config),
                Err(Error::Overflow { row: 1, col: 1, .. })
            ));
        }
    }

    #[test]
    fn test_wide_sum_carries() {
        let mut sum = WideSum::default();
        sum.add(Some(i128::MAX));
        sum.add(Some(1));
        assert_eq!(sum.value(), None);
        sum.add(Some(-1));
        assert_eq!(sum.value(), Some(i128::MAX));

        let mut poisoned = WideSum::default();
        poisoned.add(None);
        assert_eq!(poisoned.value(), None);
    }

    #[test]
    fn test_overflow_reported() {
        let a = SparseMatrix::from_triplets(1, 1, vec![(0, 0, i64::MAX)]);
        let b = SparseMatrix::from_triplets(1, 1, vec![(0, 0, 2)]);

        for config in strategies() {
            assert!(matches!(
                multiply_with(&a, &b, &config),
                Err(Error::Overflow {
                    operation: Operation::Multiply,
                    row: 0,
                    col: 0,
                })
            ));
        }
    }
}
