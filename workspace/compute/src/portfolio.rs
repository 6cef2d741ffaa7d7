//! Portfolio aggregation.
//!
//! Each position is projected with its own reactor's rates and the results
//! are summed per horizon. Aggregate ROI is never recomputed from the total
//! principal, because positions in different reactors earn different rates.

use std::collections::HashSet;

use common::{AllocationSlice, Investment, PortfolioSummary, Projection};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::projection::{PROJECTION_HORIZONS, project, roi_percentage};

/// A single holding that can be projected.
pub trait Position {
    fn reactor_id(&self) -> i32;

    fn reactor_name(&self) -> &str;

    /// Principal invested, in $NUC
    fn amount(&self) -> Decimal;

    fn annual_roi_rate(&self) -> Decimal;

    fn annual_carbon_rate(&self) -> Decimal;
}

impl Position for Investment {
    fn reactor_id(&self) -> i32 {
        self.reactor.id
    }

    fn reactor_name(&self) -> &str {
        &self.reactor.name
    }

    fn amount(&self) -> Decimal {
        self.amount_invested
    }

    fn annual_roi_rate(&self) -> Decimal {
        self.reactor.annual_roi_rate
    }

    fn annual_carbon_rate(&self) -> Decimal {
        self.reactor.annual_carbon_rate
    }
}

/// Summarizes `positions` over the standard horizons (1, 2, 5 and 10 years).
///
/// An empty portfolio yields a zero-filled projection per horizon rather
/// than an empty list, so consumers can always index by horizon.
pub fn summarize_portfolio<P: Position>(positions: &[P]) -> PortfolioSummary {
    summarize_portfolio_over(positions, &PROJECTION_HORIZONS)
}

/// Summarizes `positions` over arbitrary horizons, in the order given.
#[instrument(skip(positions), fields(num_positions = positions.len()))]
pub fn summarize_portfolio_over<P: Position>(positions: &[P], horizons: &[u32]) -> PortfolioSummary {
    let total_invested: Decimal = positions.iter().map(Position::amount).sum();

    let mut seen = HashSet::new();
    let reactors_invested_in: Vec<String> = positions
        .iter()
        .map(Position::reactor_name)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect();

    let projections = horizons
        .iter()
        .map(|&years| {
            let (total_roi, total_carbon_offset) = positions
                .iter()
                .map(|p| project(p.amount(), p.annual_roi_rate(), p.annual_carbon_rate(), years))
                .fold((Decimal::ZERO, Decimal::ZERO), |(roi, carbon), projection| {
                    (roi + projection.total_roi, carbon + projection.total_carbon_offset)
                });

            Projection {
                time_period_years: years,
                total_roi,
                total_carbon_offset,
                total_return: total_invested + total_roi,
                roi_percentage: roi_percentage(total_roi, total_invested),
            }
        })
        .collect();

    debug!(
        %total_invested,
        reactors = reactors_invested_in.len(),
        "Portfolio summarized"
    );

    PortfolioSummary {
        total_invested,
        investment_count: positions.len(),
        reactors_invested_in,
        projections,
    }
}

/// Groups positions by reactor, in first-seen order, with each reactor's
/// share of the total principal.
pub fn allocation_breakdown<P: Position>(positions: &[P]) -> Vec<AllocationSlice> {
    let mut slices: Vec<AllocationSlice> = Vec::new();

    for position in positions {
        match slices.iter_mut().find(|s| s.reactor_id == position.reactor_id()) {
            Some(slice) => slice.amount += position.amount(),
            None => slices.push(AllocationSlice {
                reactor_id: position.reactor_id(),
                reactor_name: position.reactor_name().to_string(),
                amount: position.amount(),
                share_percentage: Decimal::ZERO,
            }),
        }
    }

    let total: Decimal = slices.iter().map(|s| s.amount).sum();
    if total > Decimal::ZERO {
        for slice in &mut slices {
            slice.share_percentage = slice.amount * Decimal::ONE_HUNDRED / total;
        }
    }

    slices
}
