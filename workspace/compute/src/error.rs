use thiserror::Error;

/// Reasons an investment is rejected before it is submitted.
///
/// Investment rules are checked in declaration order and the first failure wins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The amount is zero or negative
    #[error("Investment amount must be greater than zero")]
    NonPositiveAmount,

    /// The amount is larger than the user's balance
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// The amount is larger than the reactor's remaining capacity
    #[error("Investment exceeds available reactor funding")]
    ExceedsAvailableFunding,

    /// The amount is outside the range projections are computed for
    #[error("Amount is too large to project")]
    AmountTooLarge,
}

/// Type alias for Result with ValidationError
pub type Result<T> = std::result::Result<T, ValidationError>;
