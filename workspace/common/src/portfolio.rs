use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Projected return and environmental impact over one time horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub time_period_years: u32,
    /// Cumulative return on the principal (may be negative)
    pub total_roi: Decimal,
    /// Cumulative tonnes of CO₂ offset
    pub total_carbon_offset: Decimal,
    /// Principal plus `total_roi`
    pub total_return: Decimal,
    pub roi_percentage: Decimal,
}

impl Projection {
    /// A projection with every amount at zero.
    pub fn zero(time_period_years: u32) -> Self {
        Self {
            time_period_years,
            total_roi: Decimal::ZERO,
            total_carbon_offset: Decimal::ZERO,
            total_return: Decimal::ZERO,
            roi_percentage: Decimal::ZERO,
        }
    }
}

/// Aggregate view over all of a user's investments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    pub total_invested: Decimal,
    pub investment_count: usize,
    /// Distinct reactor names in first-seen order
    pub reactors_invested_in: Vec<String>,
    /// One entry per supported horizon
    pub projections: Vec<Projection>,
}

impl PortfolioSummary {
    pub fn is_empty(&self) -> bool {
        self.investment_count == 0
    }

    /// Returns the projection for `years`, falling back to the first
    /// projection when that horizon is not part of the summary.
    pub fn projection_for(&self, years: u32) -> Option<&Projection> {
        self.projections
            .iter()
            .find(|p| p.time_period_years == years)
            .or_else(|| self.projections.first())
    }
}

/// One reactor's share of a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationSlice {
    pub reactor_id: i32,
    pub reactor_name: String,
    /// Sum of all investments in this reactor
    pub amount: Decimal,
    /// `amount` as a percentage of the portfolio total
    pub share_percentage: Decimal,
}
