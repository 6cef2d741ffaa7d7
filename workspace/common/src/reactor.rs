use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry: a fictional reactor users can fund.
///
/// Read-only from the client's point of view. `available_funding`,
/// `funding_percentage` and `is_fully_funded` are derived from the two
/// funding fields rather than trusted from the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reactor {
    pub id: i32,
    /// Display name, unique across the catalog
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Reactor technology, e.g. "Next-Gen Molten Salt Reactor (MSR)"
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Annual return as a signed fraction (0.0650 = 6.5%)
    pub annual_roi_rate: Decimal,
    /// Tonnes of CO₂ offset per $NUC invested per year
    #[serde(rename = "carbon_offset_tonnes_co2_per_nuc_per_year")]
    pub annual_carbon_rate: Decimal,
    /// Total $NUC needed to fully fund this reactor
    pub total_funding_needed: Decimal,
    /// $NUC raised so far
    pub current_funding: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Reactor {
    /// Remaining investable capacity in $NUC.
    pub fn available_funding(&self) -> Decimal {
        self.total_funding_needed - self.current_funding
    }

    /// Share of the funding target already raised, in percent, rounded to
    /// two places. Zero when the reactor has no funding target.
    pub fn funding_percentage(&self) -> Decimal {
        if self.total_funding_needed.is_zero() {
            return Decimal::ZERO;
        }
        (self.current_funding * Decimal::ONE_HUNDRED / self.total_funding_needed).round_dp(2)
    }

    pub fn is_fully_funded(&self) -> bool {
        self.current_funding >= self.total_funding_needed
    }
}
