//! Curve math errors

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// Curve tag read from account data is not a known curve
    #[error("Unknown curve type {0}")]
    UnknownCurveType(u8),

    /// Offset needs more compounding steps than the evaluator supports
    #[error("Price offset {0} is outside the supported curve range")]
    OffsetOutOfRange(i64),

    /// Price (or an intermediate linear term) does not fit the output type
    #[error("Price does not fit in u64")]
    PriceOverflow,

    /// Fee above 10,000 bps
    #[error("Fee of {0} bps exceeds 100%")]
    InvalidFeeBps(u16),
}
