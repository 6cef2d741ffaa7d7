//! Registration, login and account management endpoints.

use common::{
    AuthResponse, ChangePasswordRequest, LoginCredentials, LogoutRequest, MessageResponse,
    ProfileUpdateResponse, RegisterRequest, UpdateProfileRequest, UserProfile, WalletResetResponse,
};
use serde_json::json;
use tracing::{debug, error, info, instrument, trace};
use validator::Validate;

use crate::api::ApiClient;
use crate::error::Result;
use crate::session::Session;

impl ApiClient {
    /// Register a new account and start a session for it.
    ///
    /// The form is validated locally first; an invalid form is never sent.
    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<Session> {
        request.validate().map_err(|e| {
            debug!("Registration form rejected locally: {}", e);
            e
        })?;

        trace!("Registering user {}", request.username);
        let result: Result<AuthResponse> = self.post("/auth/register/", request, None).await;
        match &result {
            Ok(response) => info!(
                "Registered user {} (ID: {}) with balance {}",
                response.user.username, response.user.id, response.user.balance
            ),
            Err(e) => error!("Failed to register user '{}': {}", request.username, e),
        }
        Ok(Session::from_auth(result?))
    }

    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session> {
        credentials.validate()?;

        trace!("Logging in as {}", credentials.username);
        let result: Result<AuthResponse> = self.post("/auth/login/", credentials, None).await;
        match &result {
            Ok(response) => info!("Logged in as {} (ID: {})", response.user.username, response.user.id),
            Err(e) => error!("Failed to log in as '{}': {}", credentials.username, e),
        }
        Ok(Session::from_auth(result?))
    }

    /// Revoke the session's refresh token. The session is consumed either way.
    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn logout(&self, session: Session) -> Result<String> {
        let request = LogoutRequest {
            refresh: session.refresh_token().to_string(),
        };
        let result: Result<MessageResponse> = self.post("/auth/logout/", &request, Some(&session)).await;
        match &result {
            Ok(_) => info!("Logged out {}", session.username()),
            Err(e) => error!("Failed to log out {}: {}", session.username(), e),
        }
        Ok(result?.message)
    }

    /// Fetch the current profile and refresh the session's copy of the user.
    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn fetch_profile(&self, session: &mut Session) -> Result<UserProfile> {
        trace!("Fetching profile");
        let profile: UserProfile = self.get("/auth/profile/", Some(&*session)).await?;
        session.apply_profile(&profile);
        debug!("Fetched profile, balance {}", profile.balance);
        Ok(profile)
    }

    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn update_profile(
        &self,
        session: &mut Session,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile> {
        request.validate()?;

        debug!("Updating profile: {:?}", request);
        let result: Result<ProfileUpdateResponse> =
            self.put("/auth/profile/update/", request, Some(&*session)).await;
        match &result {
            Ok(response) => info!("{}", response.message),
            Err(e) => error!("Failed to update profile: {}", e),
        }
        let response = result?;
        session.apply_profile(&response.user);
        Ok(response.user)
    }

    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn change_password(&self, session: &Session, request: &ChangePasswordRequest) -> Result<String> {
        request.validate()?;

        let result: Result<MessageResponse> = self.post("/auth/password/change/", request, Some(session)).await;
        match &result {
            Ok(_) => info!("Password changed for {}", session.username()),
            Err(e) => error!("Failed to change password: {}", e),
        }
        Ok(result?.message)
    }

    /// Restore the starting balance and drop every investment.
    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn reset_wallet(&self, session: &mut Session) -> Result<WalletResetResponse> {
        let result: Result<WalletResetResponse> = self.post("/auth/wallet/reset/", &json!({}), Some(&*session)).await;
        match &result {
            Ok(response) => info!("Wallet reset, balance is now {}", response.balance),
            Err(e) => error!("Failed to reset wallet: {}", e),
        }
        let response = result?;
        session.set_balance(response.balance);
        Ok(response)
    }

    /// Permanently delete the account. The session is consumed either way.
    #[instrument(skip_all, fields(username = %session.username()))]
    pub async fn delete_account(&self, session: Session) -> Result<String> {
        let result: Result<MessageResponse> = self.delete("/auth/account/delete/", Some(&session)).await;
        match &result {
            Ok(_) => info!("Deleted account {}", session.username()),
            Err(e) => error!("Failed to delete account {}: {}", session.username(), e),
        }
        Ok(result?.message)
    }
}
