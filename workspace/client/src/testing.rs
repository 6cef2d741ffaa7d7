//! In-process fake of the NuChain backend, served over real HTTP.
//!
//! Mirrors the endpoints, payload shapes and error bodies the client relies
//! on, and keeps everything in memory. Each [`FakeBackend`] owns its own
//! state and listens on an ephemeral port, so tests can run in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use common::{
    ChangePasswordRequest, CreateInvestmentRequest, INITIAL_BALANCE, Investment, LoginCredentials,
    LogoutRequest, Page, Reactor, RegisterRequest, UpdateProfileRequest,
};
use compute::format::format_grouped;
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::session::Session;

/// Password used by [`TestUser`] unless overridden.
pub const TEST_PASSWORD: &str = "reactor-pass";

struct FakeUser {
    id: i32,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
    balance: Decimal,
}

#[derive(Default)]
struct FakeState {
    users: Vec<FakeUser>,
    reactors: Vec<Reactor>,
    investments: Vec<Investment>,
    access_tokens: HashMap<String, i32>,
    refresh_tokens: HashMap<String, i32>,
    next_id: i32,
    requests: usize,
    submissions: usize,
}

type SharedState = Arc<Mutex<FakeState>>;

impl FakeState {
    fn seeded() -> Self {
        Self {
            reactors: seed_reactors(),
            next_id: 1,
            ..Default::default()
        }
    }

    fn next_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn issue_tokens(&mut self, user_id: i32) -> (String, String) {
        let serial = self.next_id();
        let access = format!("access-{}-{}", user_id, serial);
        let refresh = format!("refresh-{}-{}", user_id, serial);
        self.access_tokens.insert(access.clone(), user_id);
        self.refresh_tokens.insert(refresh.clone(), user_id);
        (access, refresh)
    }

    fn user(&self, user_id: i32) -> Option<&FakeUser> {
        self.users.iter().find(|u| u.id == user_id)
    }

    fn user_mut(&mut self, user_id: i32) -> Option<&mut FakeUser> {
        self.users.iter_mut().find(|u| u.id == user_id)
    }

    /// Resolves the bearer token to a user id.
    fn authenticate(&self, headers: &HeaderMap) -> std::result::Result<i32, Response> {
        let Some(header) = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) else {
            return Err(error_body(
                StatusCode::UNAUTHORIZED,
                "detail",
                "Authentication credentials were not provided.",
            ));
        };
        header
            .strip_prefix("Bearer ")
            .and_then(|token| self.access_tokens.get(token))
            .copied()
            .filter(|id| self.user(*id).is_some())
            .ok_or_else(|| {
                error_body(
                    StatusCode::UNAUTHORIZED,
                    "detail",
                    "Given token not valid for any token type",
                )
            })
    }

    fn remove_investments_of(&mut self, username: &str) -> Vec<Investment> {
        let (removed, kept) = std::mem::take(&mut self.investments)
            .into_iter()
            .partition(|i| i.user == username);
        self.investments = kept;
        removed
    }
}

fn lock(state: &SharedState) -> MutexGuard<'_, FakeState> {
    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
    guard.requests += 1;
    guard
}

fn error_body(status: StatusCode, key: &str, message: &str) -> Response {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::from(message));
    (status, Json(Value::Object(body))).into_response()
}

/// Validation failure in the `{"field": ["message"]}` shape.
fn field_error(field: &str, message: &str) -> Response {
    let mut body = Map::new();
    body.insert(field.to_string(), json!([message]));
    (StatusCode::BAD_REQUEST, Json(Value::Object(body))).into_response()
}

fn user_json(user: &FakeUser) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "balance": user.balance,
    })
}

fn profile_json(user: &FakeUser) -> Value {
    json!({
        "id": user.id,
        "user": {
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "first_name": user.first_name,
            "last_name": user.last_name,
        },
        "balance": user.balance,
    })
}

async fn register(State(state): State<SharedState>, Json(request): Json<RegisterRequest>) -> Response {
    let mut state = lock(&state);
    if state.users.iter().any(|u| u.username == request.username) {
        return field_error("username", "A user with this username already exists.");
    }
    if state.users.iter().any(|u| u.email == request.email) {
        return field_error("email", "A user with this email already exists.");
    }
    if request.password != request.password_confirm {
        return field_error("non_field_errors", "Passwords do not match.");
    }

    let id = state.next_id();
    state.users.push(FakeUser {
        id,
        username: request.username,
        email: request.email,
        first_name: request.first_name.unwrap_or_default(),
        last_name: request.last_name.unwrap_or_default(),
        password: request.password,
        balance: Decimal::from(INITIAL_BALANCE),
    });
    let (access, refresh) = state.issue_tokens(id);
    let Some(user) = state.user(id) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let body = json!({
        "user": user_json(user),
        "access": access,
        "refresh": refresh,
        "message": "User created successfully with 25,000 $NUC tokens!",
    });
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn login(State(state): State<SharedState>, Json(credentials): Json<LoginCredentials>) -> Response {
    let mut state = lock(&state);
    let Some(id) = state
        .users
        .iter()
        .find(|u| u.username == credentials.username && u.password == credentials.password)
        .map(|u| u.id)
    else {
        return error_body(
            StatusCode::UNAUTHORIZED,
            "detail",
            "No active account found with the given credentials",
        );
    };

    let (access, refresh) = state.issue_tokens(id);
    let Some(user) = state.user(id) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    Json(json!({
        "user": user_json(user),
        "access": access,
        "refresh": refresh,
        "message": "Login successful!",
    }))
    .into_response()
}

async fn logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<LogoutRequest>,
) -> Response {
    let mut state = lock(&state);
    if let Err(response) = state.authenticate(&headers) {
        return response;
    }
    // Refresh tokens are blacklisted; access tokens stay valid until they expire
    match state.refresh_tokens.remove(&request.refresh) {
        Some(_) => Json(json!({ "message": "Logout successful" })).into_response(),
        None => error_body(
            StatusCode::BAD_REQUEST,
            "error",
            "Error logging out: Token is blacklisted",
        ),
    }
}

async fn profile(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    let id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.user(id) {
        Some(user) => Json(profile_json(user)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> Response {
    let mut state = lock(&state);
    let id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if let Some(email) = &request.email {
        if state.users.iter().any(|u| u.id != id && &u.email == email) {
            return field_error("email", "A user with this email already exists.");
        }
    }
    let Some(user) = state.user_mut(id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(first_name) = request.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = request.last_name {
        user.last_name = last_name;
    }
    if let Some(email) = request.email {
        user.email = email;
    }
    Json(json!({
        "user": profile_json(user),
        "message": "Profile updated successfully",
    }))
    .into_response()
}

async fn change_password(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<ChangePasswordRequest>,
) -> Response {
    let mut state = lock(&state);
    let id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(user) = state.user_mut(id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if user.password != request.old_password {
        return error_body(StatusCode::BAD_REQUEST, "error", "Current password is incorrect");
    }
    user.password = request.new_password;
    Json(json!({ "message": "Password changed successfully" })).into_response()
}

async fn reset_wallet(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = lock(&state);
    let id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(username) = state.user(id).map(|u| u.username.clone()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let removed = state.remove_investments_of(&username);
    for investment in removed {
        if let Some(reactor) = state.reactors.iter_mut().find(|r| r.id == investment.reactor.id) {
            reactor.current_funding -= investment.amount_invested;
        }
    }
    let balance = Decimal::from(INITIAL_BALANCE);
    if let Some(user) = state.user_mut(id) {
        user.balance = balance;
    }

    Json(json!({
        "message": "Wallet reset successfully! Your balance is now 25,000 $NUC.",
        "balance": balance,
    }))
    .into_response()
}

async fn delete_account(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = lock(&state);
    let id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(username) = state.user(id).map(|u| u.username.clone()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    state.remove_investments_of(&username);
    state.users.retain(|u| u.id != id);
    state.access_tokens.retain(|_, owner| *owner != id);
    state.refresh_tokens.retain(|_, owner| *owner != id);
    Json(json!({ "message": "Account deleted successfully" })).into_response()
}

async fn list_reactors(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    if let Err(response) = state.authenticate(&headers) {
        return response;
    }
    let active: Vec<Reactor> = state.reactors.iter().filter(|r| r.is_active).cloned().collect();
    Json(Page::single(active)).into_response()
}

async fn get_reactor(State(state): State<SharedState>, headers: HeaderMap, Path(id): Path<i32>) -> Response {
    let state = lock(&state);
    if let Err(response) = state.authenticate(&headers) {
        return response;
    }
    match state.reactors.iter().find(|r| r.id == id && r.is_active) {
        Some(reactor) => Json(reactor.clone()).into_response(),
        None => error_body(StatusCode::NOT_FOUND, "detail", "No Reactor matches the given query."),
    }
}

async fn list_investments(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    let id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(username) = state.user(id).map(|u| u.username.as_str()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    // Newest first
    let mine: Vec<Investment> = state
        .investments
        .iter()
        .rev()
        .filter(|i| i.user == username)
        .cloned()
        .collect();
    Json(Page::single(mine)).into_response()
}

async fn create_investment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<CreateInvestmentRequest>,
) -> Response {
    let mut state = lock(&state);
    let id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    state.submissions += 1;

    let Some(reactor_index) = state
        .reactors
        .iter()
        .position(|r| r.id == request.reactor_id && r.is_active)
    else {
        return field_error("reactor_id", "Invalid reactor.");
    };
    let amount = request.amount_invested;
    if amount <= Decimal::ZERO {
        return field_error("amount_invested", "Investment amount must be greater than zero.");
    }
    if amount > state.reactors[reactor_index].available_funding() {
        return field_error(
            "amount_invested",
            "Investment exceeds available reactor funding.",
        );
    }
    let Some(user) = state.user_mut(id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if amount > user.balance {
        return error_body(StatusCode::BAD_REQUEST, "error", "Insufficient balance");
    }
    user.balance -= amount;
    let remaining_balance = user.balance;
    let username = user.username.clone();

    state.reactors[reactor_index].current_funding += amount;
    let reactor = state.reactors[reactor_index].clone();
    let investment_id = state.next_id();
    let investment = Investment {
        id: investment_id,
        user: username,
        reactor,
        amount_invested: amount,
        created_at: Utc::now(),
    };
    state.investments.push(investment.clone());
    debug!("Fake backend accepted investment {}", investment_id);

    let body = json!({
        "investment": investment,
        "message": format!(
            "Successfully invested {} $NUC in {}",
            format_grouped(amount, 2),
            investment.reactor.name
        ),
        "remaining_balance": remaining_balance,
        "amount_invested": amount,
    });
    (StatusCode::CREATED, Json(body)).into_response()
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/auth/register/", post(register))
        .route("/api/auth/login/", post(login))
        .route("/api/auth/logout/", post(logout))
        .route("/api/auth/profile/", get(profile))
        .route("/api/auth/profile/update/", put(update_profile))
        .route("/api/auth/password/change/", post(change_password))
        .route("/api/auth/wallet/reset/", post(reset_wallet))
        .route("/api/auth/account/delete/", delete(delete_account))
        .route("/api/reactors/", get(list_reactors))
        .route("/api/reactors/:id/", get(get_reactor))
        .route("/api/investments/", get(list_investments).post(create_investment))
        .with_state(state)
}

/// A running fake backend. The server stops when the handle is dropped.
pub struct FakeBackend {
    base_url: String,
    state: SharedState,
    task: JoinHandle<()>,
}

impl FakeBackend {
    /// Base URL to hand to [`ApiClient::new`], ending in `/api`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.peek().requests
    }

    /// Number of investment submissions received, accepted or not.
    pub fn investment_submissions(&self) -> usize {
        self.peek().submissions
    }

    pub fn balance_of(&self, username: &str) -> Option<Decimal> {
        self.peek()
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.balance)
    }

    /// Overrides a reactor's current funding.
    pub fn set_current_funding(&self, reactor_id: i32, current_funding: Decimal) {
        let mut state = self.peek();
        if let Some(reactor) = state.reactors.iter_mut().find(|r| r.id == reactor_id) {
            reactor.current_funding = current_funding;
        }
    }

    fn peek(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start a fake backend on an ephemeral local port.
pub async fn spawn_fake_backend() -> std::io::Result<FakeBackend> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let state: SharedState = Arc::new(Mutex::new(FakeState::seeded()));

    let app = router(state.clone());
    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Fake backend stopped: {}", e);
        }
    });

    debug!("Fake backend listening on {}", address);
    Ok(FakeBackend {
        base_url: format!("http://{}/api", address),
        state,
        task,
    })
}

/// Registration details for a throwaway account.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub password: String,
}

impl TestUser {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
        }
    }

    pub fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.clone(),
            email: format!("{}@example.com", self.username),
            password: self.password.clone(),
            password_confirm: self.password.clone(),
            first_name: None,
            last_name: None,
        }
    }

    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub async fn register(&self, client: &ApiClient) -> Result<Session> {
        client.register(&self.register_request()).await
    }
}

fn seed_reactor(
    id: i32,
    name: &str,
    slug: &str,
    category: &str,
    location: &str,
    rates: (&str, &str),
    total_funding_needed: i64,
) -> Reactor {
    let (roi, carbon) = rates;
    Reactor {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        category: category.to_string(),
        description: String::new(),
        location: location.to_string(),
        annual_roi_rate: roi.parse().unwrap_or_default(),
        annual_carbon_rate: carbon.parse().unwrap_or_default(),
        total_funding_needed: Decimal::from(total_funding_needed),
        current_funding: Decimal::ZERO,
        is_active: true,
        created_at: None,
    }
}

/// The five reactors the backend ships with, in display order.
fn seed_reactors() -> Vec<Reactor> {
    vec![
        seed_reactor(
            1,
            "NuWave",
            "nuwave",
            "Advanced Pressurized Water Small Modular Reactor (SMR)",
            "Pacific Northwest, USA",
            ("0.0450", "0.8500"),
            180_000,
        ),
        seed_reactor(
            2,
            "Phoenix RegenX-7",
            "phoenix_regenx7",
            "Next-Gen Molten Salt Reactor (MSR)",
            "La Drôme Nucléaire, France",
            ("0.0680", "1.1500"),
            150_000,
        ),
        seed_reactor(
            3,
            "Nexus CORE",
            "nexus_core",
            "Cognitive Optimized High-Temperature Gas-Cooled Reactor (HTGR)",
            "NeueTech District, Hamburg, Germany",
            ("0.0380", "1.4000"),
            220_000,
        ),
        seed_reactor(
            4,
            "Fermi-III",
            "fermi_iii",
            "Lead-Cooled Fast Breeder Reactor (LCFBR)",
            "Cobalt Energy Complex, Ontario, Canada",
            ("0.0220", "1.8500"),
            160_000,
        ),
        seed_reactor(
            5,
            "Helios FusionDrive",
            "helios_fusiondrive",
            "Hybrid Fusion-Fission Blanket Reactor",
            "Tokamak Research Facility, Japan",
            ("-0.0150", "3.1500"),
            95_000,
        ),
    ]
}
