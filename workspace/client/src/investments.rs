use common::{CreateInvestmentRequest, Investment, InvestmentReceipt};
use tracing::{debug, error, info, instrument, trace};

use crate::api::ApiClient;
use crate::error::Result;
use crate::session::Session;

impl ApiClient {
    /// Get all of the session user's investments
    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn list_investments(&self, session: &Session) -> Result<Vec<Investment>> {
        trace!("Fetching investments");
        let result: Result<Vec<Investment>> = self.get_list("/investments/", Some(session)).await;
        match &result {
            Ok(investments) => info!("Fetched {} investments", investments.len()),
            Err(e) => error!("Failed to fetch investments: {}", e),
        }
        result
    }

    /// Submit an investment as-is.
    ///
    /// Performs no local checks; use [`crate::Dashboard::invest`] to validate
    /// against the current balance and funding first.
    #[instrument(skip_all, fields(username = %session.username(), reactor_id = request.reactor_id))]
    pub async fn create_investment(
        &self,
        session: &Session,
        request: &CreateInvestmentRequest,
    ) -> Result<InvestmentReceipt> {
        debug!("Investing {} in reactor {}", request.amount_invested, request.reactor_id);
        let result: Result<InvestmentReceipt> = self.post("/investments/", request, Some(session)).await;
        match &result {
            Ok(receipt) => info!(
                "Invested {} in {} (ID: {}), remaining balance {}",
                receipt.amount_invested, receipt.investment.reactor.name, receipt.investment.id, receipt.remaining_balance
            ),
            Err(e) => error!(
                "Failed to invest {} in reactor {}: {}",
                request.amount_invested, request.reactor_id, e
            ),
        }
        result
    }
}
