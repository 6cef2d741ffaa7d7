use common::{AuthResponse, AuthTokens, User, UserProfile};
use rust_decimal::Decimal;

/// An authenticated user and the tokens issued for them.
///
/// Returned by login and registration, passed by reference to every
/// authenticated call, and consumed by logout and account deletion.
#[derive(Debug, Clone)]
pub struct Session {
    tokens: AuthTokens,
    user: User,
}

impl Session {
    pub fn new(tokens: AuthTokens, user: User) -> Self {
        Self { tokens, user }
    }

    pub(crate) fn from_auth(response: AuthResponse) -> Self {
        let tokens = response.tokens();
        Self::new(tokens, response.user)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// Last balance the backend reported.
    pub fn balance(&self) -> Decimal {
        self.user.balance
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.tokens.access
    }

    pub(crate) fn refresh_token(&self) -> &str {
        &self.tokens.refresh
    }

    pub(crate) fn set_balance(&mut self, balance: Decimal) {
        self.user.balance = balance;
    }

    /// Copies the account fields and balance of a freshly fetched profile.
    pub(crate) fn apply_profile(&mut self, profile: &UserProfile) {
        self.user.username = profile.user.username.clone();
        self.user.email = profile.user.email.clone();
        self.user.first_name = profile.user.first_name.clone();
        self.user.last_name = profile.user.last_name.clone();
        self.user.balance = profile.balance;
    }
}
