//! Dashboard snapshot: the reactor catalog plus the user's investments.
//!
//! A [`Dashboard`] is immutable. Every summary is computed from the records
//! it was loaded with, and [`Dashboard::invest`] hands back a new snapshot
//! fetched after the investment was accepted.

use async_trait::async_trait;
use common::{
    AllocationSlice, CreateInvestmentRequest, Investment, InvestmentReceipt, PortfolioSummary,
    Projection, Reactor,
};
use compute::{
    PROJECTION_HORIZONS, allocation_breakdown, check_projection_amount, project_horizons, quick_pick_amount,
    summarize_portfolio, summarize_portfolio_over, validate_investment,
};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::session::Session;

/// Source of the records a dashboard is built from.
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    async fn fetch_reactors(&self, session: &Session) -> Result<Vec<Reactor>>;

    async fn fetch_investments(&self, session: &Session) -> Result<Vec<Investment>>;

    async fn submit_investment(
        &self,
        session: &Session,
        request: &CreateInvestmentRequest,
    ) -> Result<InvestmentReceipt>;
}

#[async_trait]
impl PortfolioBackend for ApiClient {
    async fn fetch_reactors(&self, session: &Session) -> Result<Vec<Reactor>> {
        self.list_reactors(session).await
    }

    async fn fetch_investments(&self, session: &Session) -> Result<Vec<Investment>> {
        self.list_investments(session).await
    }

    async fn submit_investment(
        &self,
        session: &Session,
        request: &CreateInvestmentRequest,
    ) -> Result<InvestmentReceipt> {
        self.create_investment(session, request).await
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    reactors: Vec<Reactor>,
    investments: Vec<Investment>,
}

impl Dashboard {
    pub fn new(reactors: Vec<Reactor>, investments: Vec<Investment>) -> Self {
        Self { reactors, investments }
    }

    /// Fetch the catalog and the user's investments concurrently.
    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn load(backend: &dyn PortfolioBackend, session: &Session) -> Result<Self> {
        let (reactors, investments) = tokio::try_join!(
            backend.fetch_reactors(session),
            backend.fetch_investments(session)
        )?;
        debug!(
            "Loaded dashboard with {} reactors and {} investments",
            reactors.len(),
            investments.len()
        );
        Ok(Self::new(reactors, investments))
    }

    pub fn reactors(&self) -> &[Reactor] {
        &self.reactors
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn reactor(&self, reactor_id: i32) -> Result<&Reactor> {
        self.reactors
            .iter()
            .find(|r| r.id == reactor_id)
            .ok_or(ClientError::UnknownReactor(reactor_id))
    }

    /// Portfolio summary over the standard horizons.
    pub fn summary(&self) -> PortfolioSummary {
        summarize_portfolio(&self.investments)
    }

    pub fn summary_over(&self, horizons: &[u32]) -> PortfolioSummary {
        summarize_portfolio_over(&self.investments, horizons)
    }

    pub fn allocations(&self) -> Vec<AllocationSlice> {
        allocation_breakdown(&self.investments)
    }

    /// Catalog reactors the user holds at least one investment in.
    pub fn invested_reactors(&self) -> Vec<&Reactor> {
        self.reactors
            .iter()
            .filter(|r| self.investments.iter().any(|i| i.reactor.id == r.id))
            .collect()
    }

    /// Projected outcome of investing `amount` in a reactor, per standard horizon.
    pub fn quote(&self, reactor_id: i32, amount: Decimal) -> Result<Vec<Projection>> {
        let reactor = self.reactor(reactor_id)?;
        check_projection_amount(amount)?;
        Ok(project_horizons(
            amount,
            reactor.annual_roi_rate,
            reactor.annual_carbon_rate,
            &PROJECTION_HORIZONS,
        ))
    }

    /// Runs the local investment checks against the session's balance.
    pub fn check_investment(&self, session: &Session, reactor_id: i32, amount: Decimal) -> Result<()> {
        let reactor = self.reactor(reactor_id)?;
        validate_investment(amount, session.balance(), reactor.available_funding())?;
        Ok(())
    }

    /// Amount for a quick-pick percentage of the tighter of balance and funding.
    pub fn quick_pick(&self, session: &Session, reactor_id: i32, percentage: u32) -> Result<Decimal> {
        let reactor = self.reactor(reactor_id)?;
        Ok(quick_pick_amount(percentage, session.balance(), reactor.available_funding()))
    }

    /// Validate, submit, then reload.
    ///
    /// Nothing is sent when the local checks fail. On success the session
    /// takes the backend's remaining balance and the returned dashboard
    /// reflects the new investment.
    #[instrument(skip(self, backend, session), fields(username = %session.username()))]
    pub async fn invest(
        &self,
        backend: &dyn PortfolioBackend,
        session: &mut Session,
        reactor_id: i32,
        amount: Decimal,
    ) -> Result<(InvestmentReceipt, Dashboard)> {
        self.check_investment(session, reactor_id, amount)?;

        let request = CreateInvestmentRequest {
            reactor_id,
            amount_invested: amount,
        };
        let receipt = backend.submit_investment(session, &request).await?;
        session.set_balance(receipt.remaining_balance);
        info!("{}", receipt.message);

        let refreshed = Dashboard::load(backend, session).await?;
        Ok((receipt, refreshed))
    }
}
