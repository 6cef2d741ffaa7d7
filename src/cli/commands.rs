pub mod account;
pub mod portfolio;
pub mod reactors;
pub mod register;

use anyhow::{Context, Result};
use client::{ApiClient, Session};
use common::LoginCredentials;
use tracing::{debug, trace, warn};

/// Log in for the duration of one command.
pub(crate) async fn open_session(client: &ApiClient, credentials: &LoginCredentials) -> Result<Session> {
    trace!("Opening session for {}", credentials.username);
    let session = client
        .login(credentials)
        .await
        .with_context(|| format!("Login failed for '{}'", credentials.username))?;
    debug!("Session opened for {}", session.username());
    Ok(session)
}

/// Log out at the end of a command. A failed logout is not fatal.
pub(crate) async fn close_session(client: &ApiClient, session: Session) {
    let username = session.username().to_string();
    match client.logout(session).await {
        Ok(_) => debug!("Session closed for {}", username),
        Err(e) => warn!("Failed to close session for {}: {}", username, e),
    }
}
