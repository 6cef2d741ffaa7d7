use anyhow::{Context, Result, bail};
use client::ApiClient;
use common::{ChangePasswordRequest, LoginCredentials, UpdateProfileRequest};
use compute::format::format_currency;
use tracing::{info, trace, warn};

use crate::helpers::views::render_user;

use super::{close_session, open_session};

pub async fn login(client: &ApiClient, credentials: &LoginCredentials) -> Result<String> {
    trace!("Entering login command");
    let session = open_session(client, credentials).await?;
    let output = format!("Logged in.\n{}", render_user(session.user()));
    close_session(client, session).await;
    Ok(output)
}

pub async fn profile(client: &ApiClient, credentials: &LoginCredentials) -> Result<String> {
    trace!("Entering profile command");
    let mut session = open_session(client, credentials).await?;

    let result = client
        .fetch_profile(&mut session)
        .await
        .context("Failed to fetch profile");
    let output = render_user(session.user());
    close_session(client, session).await;

    result?;
    Ok(output)
}

pub async fn update_profile(
    client: &ApiClient,
    credentials: &LoginCredentials,
    request: UpdateProfileRequest,
) -> Result<String> {
    trace!("Entering update_profile command");
    if request.is_empty() {
        bail!("Nothing to update: give --first-name, --last-name or --email");
    }
    let mut session = open_session(client, credentials).await?;

    let result = client
        .update_profile(&mut session, &request)
        .await
        .context("Failed to update profile");
    let output = render_user(session.user());
    close_session(client, session).await;

    result?;
    info!("Profile updated");
    Ok(format!("Profile updated.\n{}", output))
}

pub async fn change_password(
    client: &ApiClient,
    credentials: &LoginCredentials,
    new_password: String,
) -> Result<String> {
    trace!("Entering change_password command");
    let session = open_session(client, credentials).await?;

    let request = ChangePasswordRequest {
        old_password: credentials.password.clone(),
        new_password,
    };
    let result = client
        .change_password(&session, &request)
        .await
        .context("Failed to change password");
    close_session(client, session).await;

    Ok(result?)
}

pub async fn reset_wallet(client: &ApiClient, credentials: &LoginCredentials) -> Result<String> {
    trace!("Entering reset_wallet command");
    let mut session = open_session(client, credentials).await?;

    let result = client
        .reset_wallet(&mut session)
        .await
        .context("Failed to reset wallet");
    close_session(client, session).await;

    let response = result?;
    Ok(format!("{}\nBalance: {}", response.message, format_currency(response.balance)))
}

/// Deletes the account. The session ends with the account, so there is no logout.
pub async fn delete_account(client: &ApiClient, credentials: &LoginCredentials) -> Result<String> {
    trace!("Entering delete_account command");
    let session = open_session(client, credentials).await?;
    let username = session.username().to_string();

    let message = client
        .delete_account(session)
        .await
        .context("Failed to delete account")?;
    warn!("Account {} deleted", username);
    Ok(message)
}
