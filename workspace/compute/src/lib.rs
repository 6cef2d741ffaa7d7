//! Investment validation, projections and portfolio aggregation.
//!
//! Everything here is synchronous and pure: inputs come from records the
//! client fetched, and nothing is cached between calls.

pub mod error;
pub mod format;
pub mod portfolio;
pub mod projection;
pub mod validation;

pub use error::{Result, ValidationError};
pub use portfolio::{Position, allocation_breakdown, summarize_portfolio, summarize_portfolio_over};
pub use projection::{
    MAX_PROJECTED_AMOUNT, PROJECTION_HORIZONS, check_projection_amount, project, project_for_reactor,
    project_horizons,
};
pub use validation::{QUICK_PICK_PERCENTAGES, quick_pick_amount, validate_investment};
