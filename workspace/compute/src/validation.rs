//! Investment validation for the investment form.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, instrument};

use crate::error::{Result, ValidationError};

/// Percentages offered as one-click amounts on the investment form.
/// 100 is the "MAX" pick.
pub const QUICK_PICK_PERCENTAGES: [u32; 4] = [25, 50, 75, 100];

/// Checks a proposed amount against the user's balance and the reactor's
/// available funding.
///
/// Does not touch either value: balance and funding only change on the
/// backend, and callers must re-fetch them after a successful submission.
#[instrument(level = "trace")]
pub fn validate_investment(
    amount: Decimal,
    balance: Decimal,
    available_funding: Decimal,
) -> Result<()> {
    let rejection = if amount <= Decimal::ZERO {
        Some(ValidationError::NonPositiveAmount)
    } else if amount > balance {
        Some(ValidationError::InsufficientBalance)
    } else if amount > available_funding {
        Some(ValidationError::ExceedsAvailableFunding)
    } else {
        None
    };

    match rejection {
        Some(reason) => {
            debug!(%amount, %balance, %available_funding, %reason, "Investment rejected");
            Err(reason)
        }
        None => Ok(()),
    }
}

/// Amount for a quick-pick button: `percentage` of whichever is smaller,
/// the balance or the reactor's available funding.
///
/// Truncated to cents so the MAX pick never exceeds either limit.
pub fn quick_pick_amount(percentage: u32, balance: Decimal, available_funding: Decimal) -> Decimal {
    let ceiling = balance.min(available_funding).max(Decimal::ZERO);
    (ceiling * Decimal::from(percentage) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_valid_investment() {
        assert_eq!(validate_investment(d("500"), d("25000"), d("1000")), Ok(()));
    }

    #[test]
    fn test_amount_equal_to_both_limits_is_valid() {
        assert_eq!(validate_investment(d("1000"), d("1000"), d("1000")), Ok(()));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        for amount in ["0", "-0.01", "-5000"] {
            assert_eq!(
                validate_investment(d(amount), d("25000"), d("180000")),
                Err(ValidationError::NonPositiveAmount),
                "amount {amount}"
            );
        }
    }

    #[test]
    fn test_non_positive_wins_over_other_rules() {
        // Zero balance and zero funding would also fail, but the amount rule comes first
        assert_eq!(
            validate_investment(d("0"), d("0"), d("0")),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_insufficient_balance_regardless_of_funding() {
        for funding in ["0", "100", "1000000"] {
            assert_eq!(
                validate_investment(d("30000"), d("25000"), d(funding)),
                Err(ValidationError::InsufficientBalance),
                "funding {funding}"
            );
        }
    }

    #[test]
    fn test_exceeds_available_funding() {
        assert_eq!(
            validate_investment(d("5000"), d("25000"), d("4999.99")),
            Err(ValidationError::ExceedsAvailableFunding)
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            ValidationError::NonPositiveAmount.to_string(),
            "Investment amount must be greater than zero"
        );
        assert_eq!(ValidationError::InsufficientBalance.to_string(), "Insufficient balance");
        assert_eq!(
            ValidationError::ExceedsAvailableFunding.to_string(),
            "Investment exceeds available reactor funding"
        );
    }

    #[test]
    fn test_quick_pick_uses_smaller_limit() {
        // Balance is the limit
        assert_eq!(quick_pick_amount(50, d("25000"), d("180000")), d("12500"));
        // Reactor funding is the limit
        assert_eq!(quick_pick_amount(25, d("25000"), d("4000")), d("1000"));
    }

    #[test]
    fn test_quick_pick_max_always_validates() {
        let balance = d("1234.567");
        let funding = d("99999");
        let amount = quick_pick_amount(100, balance, funding);

        assert_eq!(amount, d("1234.56"));
        assert_eq!(validate_investment(amount, balance, funding), Ok(()));
    }

    #[test]
    fn test_quick_pick_never_negative() {
        assert_eq!(quick_pick_amount(75, d("25000"), d("-10")), Decimal::ZERO);
    }
}
