use platestats_model::WellId;

/// Why a window cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RangeError {
    #[display("begin must not be negative, got {begin}")]
    NegativeBegin { begin: i64 },
    #[display("length must be at least 1, got {length}")]
    EmptyLength { length: i64 },
    #[display("begin {begin} + length {length} exceeds well {well} with {size} readings")]
    Overrun {
        well: WellId,
        begin: usize,
        length: usize,
        size: usize,
    },
}

/// Errors raised by statistic operations.
///
/// Every error aborts the whole call: fan-out and aggregated operations never
/// return partial results.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum StatError {
    /// A window is malformed or does not fit a touched well.
    #[display("invalid range: {_0}")]
    InvalidRange(RangeError),
    /// A statistic parameter is missing or out of its domain.
    #[display("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// The readings handed to a reduction are fewer than it requires.
    #[display("{statistic} needs at least {required} values, got {actual}")]
    InsufficientData {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },
    /// A result was looked up under a key that was never part of the input.
    #[display("no result for '{key}'")]
    UnknownIdentity { key: String },
}

impl From<RangeError> for StatError {
    fn from(error: RangeError) -> Self {
        Self::InvalidRange(error)
    }
}
