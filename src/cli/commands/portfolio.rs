use anyhow::{Context, Result};
use client::{ApiClient, Dashboard};
use common::LoginCredentials;
use rust_decimal::Decimal;
use tracing::{debug, error, info, trace};

use crate::helpers::views::{render_investments, render_portfolio, render_receipt};

use super::{close_session, open_session};

/// How much to invest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvestAmount {
    Exact(Decimal),
    /// Percentage of the smaller of balance and remaining funding
    QuickPick(u32),
}

pub async fn invest(
    client: &ApiClient,
    credentials: &LoginCredentials,
    reactor_id: i32,
    amount: InvestAmount,
) -> Result<String> {
    trace!("Entering invest command for reactor {}", reactor_id);
    let mut session = open_session(client, credentials).await?;

    let result = async {
        let dashboard = Dashboard::load(client, &session)
            .await
            .context("Failed to load dashboard")?;
        let amount = match amount {
            InvestAmount::Exact(amount) => amount,
            InvestAmount::QuickPick(percent) => {
                let picked = dashboard.quick_pick(&session, reactor_id, percent)?;
                debug!("Quick pick {}% is {}", percent, picked);
                picked
            }
        };

        let (receipt, dashboard) = dashboard
            .invest(client, &mut session, reactor_id, amount)
            .await
            .context("Investment failed")?;
        info!("Investment {} accepted", receipt.investment.id);
        anyhow::Ok(render_receipt(&receipt, &dashboard.summary()))
    }
    .await;

    close_session(client, session).await;
    result.map_err(|e| {
        error!("Failed to invest in reactor {}: {:#}", reactor_id, e);
        e
    })
}

pub async fn list_investments(client: &ApiClient, credentials: &LoginCredentials) -> Result<String> {
    trace!("Entering list_investments command");
    let session = open_session(client, credentials).await?;

    let result = client
        .list_investments(&session)
        .await
        .context("Failed to fetch investments");
    close_session(client, session).await;

    Ok(render_investments(&result?))
}

pub async fn portfolio(client: &ApiClient, credentials: &LoginCredentials, years: u32) -> Result<String> {
    trace!("Entering portfolio command");
    let session = open_session(client, credentials).await?;
    let balance = session.balance();

    let result = Dashboard::load(client, &session)
        .await
        .context("Failed to load dashboard");
    close_session(client, session).await;

    let dashboard = result?;
    let summary = dashboard.summary();
    debug!(
        "Portfolio of {} investments, {} invested",
        summary.investment_count, summary.total_invested
    );
    Ok(render_portfolio(&summary, &dashboard.allocations(), balance, years))
}
