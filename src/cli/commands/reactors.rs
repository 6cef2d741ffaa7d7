use anyhow::{Context, Result};
use client::ApiClient;
use common::LoginCredentials;
use compute::{PROJECTION_HORIZONS, check_projection_amount, project_horizons, validate_investment};
use rust_decimal::Decimal;
use tracing::{debug, info, trace};

use crate::helpers::views::{render_quote, render_reactor, render_reactor_table};

use super::{close_session, open_session};

pub async fn list_reactors(client: &ApiClient, credentials: &LoginCredentials) -> Result<String> {
    trace!("Entering list_reactors command");
    let session = open_session(client, credentials).await?;

    let result = client.list_reactors(&session).await.context("Failed to fetch reactors");
    close_session(client, session).await;

    let reactors = result?;
    info!("Listing {} reactors", reactors.len());
    Ok(render_reactor_table(&reactors))
}

pub async fn show_reactor(
    client: &ApiClient,
    credentials: &LoginCredentials,
    reactor_id: i32,
    amount: Decimal,
) -> Result<String> {
    trace!("Entering show_reactor command for reactor {}", reactor_id);
    check_projection_amount(amount).with_context(|| format!("Cannot project {} $NUC", amount))?;
    let session = open_session(client, credentials).await?;

    let result = client
        .get_reactor(&session, reactor_id)
        .await
        .with_context(|| format!("Failed to fetch reactor {}", reactor_id));
    close_session(client, session).await;

    let reactor = result?;
    let projections = project_horizons(
        amount,
        reactor.annual_roi_rate,
        reactor.annual_carbon_rate,
        &PROJECTION_HORIZONS,
    );
    Ok(render_reactor(&reactor, amount, &projections))
}

/// Projects an investment and runs the same checks `invest` would, without
/// submitting anything.
pub async fn quote(
    client: &ApiClient,
    credentials: &LoginCredentials,
    reactor_id: i32,
    amount: Decimal,
) -> Result<String> {
    trace!("Entering quote command for reactor {}", reactor_id);
    check_projection_amount(amount).with_context(|| format!("Cannot quote {} $NUC", amount))?;
    let session = open_session(client, credentials).await?;
    let balance = session.balance();

    let result = client
        .get_reactor(&session, reactor_id)
        .await
        .with_context(|| format!("Failed to fetch reactor {}", reactor_id));
    close_session(client, session).await;

    let reactor = result?;
    let projections = project_horizons(
        amount,
        reactor.annual_roi_rate,
        reactor.annual_carbon_rate,
        &PROJECTION_HORIZONS,
    );
    let check = validate_investment(amount, balance, reactor.available_funding());
    debug!("Quote for {} in {}: {:?}", amount, reactor.name, check);

    Ok(render_quote(&reactor, amount, balance, &projections, check))
}
