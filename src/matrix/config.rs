//! Policy knobs for decoding and arithmetic

/// What to do with entries whose computed value is exactly zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPolicy {
    /// Store zero results like any other entry
    #[default]
    Keep,
    /// Drop zero results from the output mapping
    Prune,
}

impl ZeroPolicy {
    /// Whether a computed value should be kept under this policy
    pub fn keeps<T: num_traits::Zero>(&self, value: &T) -> bool {
        match self {
            ZeroPolicy::Keep => true,
            ZeroPolicy::Prune => !value.is_zero(),
        }
    }
}

/// Algorithm used to multiply two sparse matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiplyStrategy {
    /// Compare every stored entry of A with every stored entry of B
    NestedScan,
    /// Group B's entries by row, then join against A's column index
    #[default]
    RowJoin,
}

/// How strictly entry indices are checked against declared dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Accept entries outside the declared dimensions
    #[default]
    Unchecked,
    /// Reject entries outside the declared dimensions
    Strict,
}

/// Configuration shared by the codec and the arithmetic engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Handling of zero-valued results in add, subtract and multiply
    pub zero_policy: ZeroPolicy,

    /// Multiplication algorithm
    pub multiply_strategy: MultiplyStrategy,

    /// Index checking when decoding
    pub bounds_policy: BoundsPolicy,
}

impl MatrixConfig {
    /// Config that prunes zero results and rejects out-of-range entries
    pub fn strict() -> Self {
        Self {
            zero_policy: ZeroPolicy::Prune,
            multiply_strategy: MultiplyStrategy::default(),
            bounds_policy: BoundsPolicy::Strict,
        }
    }
}
