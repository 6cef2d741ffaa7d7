//! Plain-text rendering for command output.

use std::fmt::Write;

use common::{AllocationSlice, Investment, InvestmentReceipt, PortfolioSummary, Projection, Reactor, User};
use compute::ValidationError;
use compute::format::{
    format_carbon_offset, format_currency, format_fixed, format_percentage, format_roi_rate,
    format_signed_percentage,
};
use rust_decimal::Decimal;

fn horizon_label(years: u32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{} years", years)
    }
}

pub fn render_user(user: &User) -> String {
    let mut out = String::new();
    let display_name = user.display_name();
    if display_name == user.username {
        let _ = writeln!(out, "{}", user.username);
    } else {
        let _ = writeln!(out, "{} ({})", user.username, display_name);
    }
    if !user.email.is_empty() {
        let _ = writeln!(out, "Email:   {}", user.email);
    }
    let _ = writeln!(out, "Balance: {}", format_currency(user.balance));
    if let Some(wallet) = &user.wallet {
        let _ = writeln!(out, "Wallet:  {} ({})", wallet.address, wallet.basescan_url);
    }
    out.trim_end().to_string()
}

pub fn render_reactor_table(reactors: &[Reactor]) -> String {
    if reactors.is_empty() {
        return "No reactors are open for investment.".to_string();
    }

    let mut out = format!(
        "{:<4}{:<22}{:>11}{:>13}{:>9}  {}\n",
        "ID", "Reactor", "Annual ROI", "CO₂/NUC/yr", "Funded", "Available"
    );
    for reactor in reactors {
        let _ = writeln!(
            out,
            "{:<4}{:<22}{:>11}{:>13}{:>9}  {}",
            reactor.id,
            reactor.name,
            format_roi_rate(reactor.annual_roi_rate),
            format_fixed(reactor.annual_carbon_rate, 2),
            format_percentage(reactor.funding_percentage(), 1),
            format_currency(reactor.available_funding()),
        );
    }
    out.trim_end().to_string()
}

pub fn render_projection_table(projections: &[Projection]) -> String {
    let mut out = format!(
        "{:<10}{:>20}{:>20}{:>10}  {}\n",
        "Horizon", "Total return", "Gain", "ROI", "Carbon offset"
    );
    for projection in projections {
        let _ = writeln!(
            out,
            "{:<10}{:>20}{:>20}{:>10}  {}",
            horizon_label(projection.time_period_years),
            format_currency(projection.total_return),
            format_currency(projection.total_roi),
            format_signed_percentage(projection.roi_percentage),
            format_carbon_offset(projection.total_carbon_offset),
        );
    }
    out.trim_end().to_string()
}

pub fn render_reactor(reactor: &Reactor, amount: Decimal, projections: &[Projection]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", reactor.name, reactor.slug);
    if !reactor.category.is_empty() {
        let _ = writeln!(out, "{}", reactor.category);
    }
    if !reactor.location.is_empty() {
        let _ = writeln!(out, "Location:      {}", reactor.location);
    }
    if !reactor.description.is_empty() {
        let _ = writeln!(out, "\n{}\n", reactor.description.trim());
    }
    let _ = writeln!(out, "Annual ROI:    {}", format_roi_rate(reactor.annual_roi_rate));
    let _ = writeln!(
        out,
        "Carbon offset: {} tonnes CO₂ per $NUC per year",
        format_fixed(reactor.annual_carbon_rate, 2)
    );
    let _ = writeln!(
        out,
        "Funding:       {} of {} ({}), {} available",
        format_currency(reactor.current_funding),
        format_currency(reactor.total_funding_needed),
        format_percentage(reactor.funding_percentage(), 2),
        format_currency(reactor.available_funding()),
    );
    if reactor.is_fully_funded() {
        let _ = writeln!(out, "This reactor is fully funded.");
    }
    let _ = writeln!(out, "\nProjections for {}:", format_currency(amount));
    out.push_str(&render_projection_table(projections));
    out
}

/// Preview of an investment, with the outcome of the local checks.
pub fn render_quote(
    reactor: &Reactor,
    amount: Decimal,
    balance: Decimal,
    projections: &[Projection],
    check: Result<(), ValidationError>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Investing {} in {}", format_currency(amount), reactor.name);
    let _ = writeln!(
        out,
        "Balance: {}, available funding: {}\n",
        format_currency(balance),
        format_currency(reactor.available_funding())
    );
    let _ = writeln!(out, "{}\n", render_projection_table(projections));
    match check {
        Ok(()) => out.push_str("Status: ready to invest"),
        Err(reason) => {
            let _ = write!(out, "Status: not allowed: {}", reason);
        }
    }
    out
}

pub fn render_receipt(receipt: &InvestmentReceipt, summary: &PortfolioSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", receipt.message);
    let _ = writeln!(out, "Remaining balance: {}", format_currency(receipt.remaining_balance));
    if let Some(tx_url) = receipt.tx_url.as_deref().or(receipt.tx_hash.as_deref()) {
        let _ = writeln!(out, "Transaction: {}", tx_url);
    }
    let _ = write!(
        out,
        "Portfolio: {} across {} investment{}",
        format_currency(summary.total_invested),
        summary.investment_count,
        if summary.investment_count == 1 { "" } else { "s" }
    );
    out
}

pub fn render_investments(investments: &[Investment]) -> String {
    if investments.is_empty() {
        return "No investments yet.".to_string();
    }

    let mut out = format!("{:<12}{:<22}{:>20}\n", "Date", "Reactor", "Amount");
    for investment in investments {
        let _ = writeln!(
            out,
            "{:<12}{:<22}{:>20}",
            investment.created_at.format("%Y-%m-%d").to_string(),
            investment.reactor.name,
            format_currency(investment.amount_invested),
        );
    }
    out.trim_end().to_string()
}

/// Dashboard view: headline numbers for one horizon, the allocation and
/// the full projection table.
pub fn render_portfolio(
    summary: &PortfolioSummary,
    allocations: &[AllocationSlice],
    balance: Decimal,
    years: u32,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Balance:        {}", format_currency(balance));
    if summary.is_empty() {
        out.push_str("No investments yet.");
        return out;
    }

    let _ = writeln!(
        out,
        "Total invested: {} in {} investment{}",
        format_currency(summary.total_invested),
        summary.investment_count,
        if summary.investment_count == 1 { "" } else { "s" }
    );
    let _ = writeln!(out, "Reactors:       {}", summary.reactors_invested_in.join(", "));

    if let Some(highlight) = summary.projection_for(years) {
        let _ = writeln!(out, "\nAfter {}:", horizon_label(highlight.time_period_years));
        let _ = writeln!(out, "  Total return:  {}", format_currency(highlight.total_return));
        let _ = writeln!(
            out,
            "  Gain:          {} ({})",
            format_currency(highlight.total_roi),
            format_signed_percentage(highlight.roi_percentage)
        );
        let _ = writeln!(out, "  Carbon offset: {}", format_carbon_offset(highlight.total_carbon_offset));
    }

    let _ = writeln!(out, "\nAllocation:");
    for slice in allocations {
        let _ = writeln!(
            out,
            "  {:<22}{:>20}{:>9}",
            slice.reactor_name,
            format_currency(slice.amount),
            format_percentage(slice.share_percentage, 1)
        );
    }

    let _ = writeln!(out, "\nProjections:");
    out.push_str(&render_projection_table(&summary.projections));
    out
}
