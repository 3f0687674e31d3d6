// Matrix data structures and configuration

pub mod config;
pub mod scalar;
pub mod sparse;

pub use config::{BoundsPolicy, MatrixConfig, MultiplyStrategy, ZeroPolicy};
pub use scalar::Scalar;
pub use sparse::{Entries, SparseMatrix};
