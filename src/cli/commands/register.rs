use anyhow::{Context, Result, bail};
use client::ApiClient;
use common::RegisterRequest;
use tracing::{debug, info, trace};

use crate::cli::Credentials;
use crate::helpers::views::render_user;

use super::close_session;

/// Registration fields that are not part of the shared credentials.
pub struct RegisterOptions {
    pub email: String,
    pub password_confirm: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn register(client: &ApiClient, credentials: &Credentials, options: RegisterOptions) -> Result<String> {
    trace!("Entering register command");
    let Some(username) = credentials.username.clone() else {
        bail!("A username is required (--username or NUCHAIN_USERNAME)");
    };
    let Some(password) = credentials.password.clone() else {
        bail!("A password is required (--password or NUCHAIN_PASSWORD)");
    };

    let request = RegisterRequest {
        username,
        email: options.email,
        password_confirm: options.password_confirm.unwrap_or_else(|| password.clone()),
        password,
        first_name: options.first_name,
        last_name: options.last_name,
    };
    debug!("Registering {:?}", request);

    let session = client
        .register(&request)
        .await
        .with_context(|| format!("Registration failed for '{}'", request.username))?;
    info!("Registered {}", session.username());

    let output = format!("Welcome to NuChain!\n{}", render_user(session.user()));
    close_session(client, session).await;
    Ok(output)
}
