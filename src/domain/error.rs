//! Errors raised by the pricing model.

use thiserror::Error;

/// Failures of [`evaluate`](crate::domain::pricing::evaluate).
///
/// Everything past normalization is plain arithmetic over validated
/// totals, so running out of data is the only way the model can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Neither side of the market has a usable observation.
    #[error("insufficient data: no valid active or sold listings (received {active} active, {sold} sold)")]
    InsufficientData {
        /// Active listings received before cleaning.
        active: usize,
        /// Sold listings received before cleaning.
        sold: usize,
    },
}
