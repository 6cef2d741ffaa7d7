//! Return and carbon-offset projections.
//!
//! The model is simple, non-compounding interest: every amount scales
//! linearly with the principal and with the number of elapsed years.
//! Rates may be negative; no formula special-cases them.

use common::{Projection, Reactor};
use rust_decimal::Decimal;

use crate::error::{Result, ValidationError};

/// Horizons, in years, shown on the dashboard and in the portfolio summary.
pub const PROJECTION_HORIZONS: [u32; 4] = [1, 2, 5, 10];

/// Largest amount, in whole $NUC, accepted for a projection.
///
/// Well above any balance or funding target the backend can store, and small
/// enough that amount × rate × years stays inside `Decimal`'s range for any
/// stored rate.
pub const MAX_PROJECTED_AMOUNT: i64 = 1_000_000_000_000_000;

/// Rejects amounts user input can carry but [`project`] cannot handle.
pub fn check_projection_amount(amount: Decimal) -> Result<()> {
    if amount.abs() > Decimal::from(MAX_PROJECTED_AMOUNT) {
        Err(ValidationError::AmountTooLarge)
    } else {
        Ok(())
    }
}

/// Projects `amount` over `years` at the given annual rates.
///
/// `amount` must pass [`check_projection_amount`]; amounts read from backend
/// records always do.
pub fn project(
    amount: Decimal,
    annual_roi_rate: Decimal,
    annual_carbon_rate: Decimal,
    years: u32,
) -> Projection {
    let elapsed = Decimal::from(years);
    let total_roi = amount * annual_roi_rate * elapsed;
    let total_carbon_offset = amount * annual_carbon_rate * elapsed;

    Projection {
        time_period_years: years,
        total_roi,
        total_carbon_offset,
        total_return: amount + total_roi,
        roi_percentage: roi_percentage(total_roi, amount),
    }
}

/// One projection per horizon, in the order given.
pub fn project_horizons(
    amount: Decimal,
    annual_roi_rate: Decimal,
    annual_carbon_rate: Decimal,
    horizons: &[u32],
) -> Vec<Projection> {
    horizons
        .iter()
        .map(|&years| project(amount, annual_roi_rate, annual_carbon_rate, years))
        .collect()
}

/// Projects a prospective investment in `reactor`.
pub fn project_for_reactor(amount: Decimal, reactor: &Reactor, years: u32) -> Projection {
    project(amount, reactor.annual_roi_rate, reactor.annual_carbon_rate, years)
}

/// `total_roi` as a percentage of `principal`; zero when there is no principal.
pub(crate) fn roi_percentage(total_roi: Decimal, principal: Decimal) -> Decimal {
    if principal > Decimal::ZERO {
        total_roi / principal * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
