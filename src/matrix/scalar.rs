//! Element type bound for sparse matrices

use num_traits::PrimInt;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Integer types that can be stored in a [`SparseMatrix`](super::SparseMatrix)
///
/// Anything implementing `PrimInt` that can be parsed from and written to
/// text qualifies; `i64` is the default element type.
pub trait Scalar: PrimInt + FromStr + Display + Debug + 'static {}

impl<T> Scalar for T where T: PrimInt + FromStr + Display + Debug + 'static {}
