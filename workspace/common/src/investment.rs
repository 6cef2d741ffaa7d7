use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reactor::Reactor;

/// A user's allocation of balance to a reactor.
///
/// The backend nests the full reactor record, so every investment carries
/// the rates needed to project it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investment {
    pub id: i32,
    /// Username of the owner
    #[serde(default)]
    pub user: String,
    pub reactor: Reactor,
    pub amount_invested: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request body for submitting a new investment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateInvestmentRequest {
    pub reactor_id: i32,
    pub amount_invested: Decimal,
}

/// Backend response to a successful investment submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentReceipt {
    pub investment: Investment,
    pub message: String,
    /// Authoritative balance after the deduction
    pub remaining_balance: Decimal,
    pub amount_invested: Decimal,
    /// On-chain transfer hash, when the backend mirrors the investment on-chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_with_float_balance() {
        let json = r#"{
            "investment": {
                "id": 11,
                "user": "alice",
                "reactor": {
                    "id": 1,
                    "name": "NuWave",
                    "annual_roi_rate": "0.0450",
                    "carbon_offset_tonnes_co2_per_nuc_per_year": "0.8500",
                    "total_funding_needed": "180000.00",
                    "current_funding": "1000.00"
                },
                "amount_invested": "1000.00",
                "created_at": "2025-06-02T08:30:00Z"
            },
            "message": "Successfully invested 1,000.00 $NUC in NuWave",
            "remaining_balance": 24000.0,
            "amount_invested": 1000.0
        }"#;

        let receipt: InvestmentReceipt = serde_json::from_str(json).unwrap();

        assert_eq!(receipt.remaining_balance, Decimal::from(24_000));
        assert_eq!(receipt.investment.user, "alice");
        assert_eq!(receipt.investment.reactor.name, "NuWave");
        assert!(receipt.tx_hash.is_none());
    }

    #[test]
    fn test_create_request_serializes_amount_as_string() {
        let request = CreateInvestmentRequest {
            reactor_id: 3,
            amount_invested: Decimal::new(25050, 2),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["reactor_id"], 3);
        assert_eq!(value["amount_invested"], "250.50");
    }
}
