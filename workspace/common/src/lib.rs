//! Common transport-layer types shared between the compute core and the
//! backend client. Field names mirror the backend's JSON payloads so API
//! responses deserialize without an intermediate shape.

mod auth;
mod investment;
mod portfolio;
mod reactor;

pub use auth::{
    AuthResponse, AuthTokens, ChangePasswordRequest, LoginCredentials, LogoutRequest,
    MessageResponse, ProfileAccount, ProfileUpdateResponse, RegisterRequest, UpdateProfileRequest,
    User, UserProfile, Wallet, WalletResetResponse,
};
pub use investment::{CreateInvestmentRequest, Investment, InvestmentReceipt};
pub use portfolio::{AllocationSlice, PortfolioSummary, Projection};
pub use reactor::Reactor;

use serde::{Deserialize, Serialize};

/// Unit suffix for every token amount shown to users.
pub const CURRENCY_SYMBOL: &str = "$NUC";

/// Balance credited to a freshly registered (or reset) wallet.
pub const INITIAL_BALANCE: u32 = 25_000;

/// Paginated list envelope returned by the backend's collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Total number of records across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,
    /// Records on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps a full result set into a single page.
    pub fn single(results: Vec<T>) -> Self {
        Self {
            count: Some(results.len() as u64),
            next: None,
            previous: None,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_without_pagination_links() {
        let page: Page<i32> = serde_json::from_str(r#"{"results": [1, 2, 3]}"#).unwrap();
        assert_eq!(page.results, vec![1, 2, 3]);
        assert_eq!(page.count, None);
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_single_page_counts_results() {
        let page = Page::single(vec!["a", "b"]);
        assert_eq!(page.count, Some(2));
        assert!(page.previous.is_none());
    }
}
