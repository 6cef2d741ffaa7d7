use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Custodial wallet attached to a user, shown for display only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wallet {
    pub address: String,
    /// Block explorer link for the address
    pub basescan_url: String,
}

/// Authenticated user as returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Current $NUC balance
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<Wallet>,
}

impl User {
    /// "First Last" when either part is set, the username otherwise.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// JWT pair issued by the backend.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Response to a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub message: String,
}

impl AuthResponse {
    pub fn tokens(&self) -> AuthTokens {
        AuthTokens {
            access: self.access.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form. Validated locally before it is sent.
#[derive(Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1 to 150 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Partial profile update; only the provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// Account fields nested inside a [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileAccount {
    pub id: i32,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

/// Profile record returned by `GET /auth/profile/` and by profile updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i32,
    pub user: ProfileAccount,
    pub balance: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdateResponse {
    pub user: UserProfile,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest { .. }")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogoutRequest {
    pub refresh: String,
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletResetResponse {
    pub message: String,
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "correct horse".to_string(),
            password_confirm: "correct horse".to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
        }
    }

    #[test]
    fn test_valid_register_request() {
        assert!(register_request().validate().is_ok());
    }

    #[test]
    fn test_register_rejects_mismatched_confirmation() {
        let mut request = register_request();
        request.password_confirm = "something else".to_string();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password_confirm"));
    }

    #[test]
    fn test_register_rejects_short_password() {
        let mut request = register_request();
        request.password = "short".to_string();
        request.password_confirm = "short".to_string();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let mut request = register_request();
        request.email = "not-an-email".to_string();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_omits_missing_names() {
        let value = serde_json::to_value(register_request()).unwrap();
        assert_eq!(value["first_name"], "Alice");
        assert!(value.get("last_name").is_none());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let credentials = LoginCredentials {
            username: "alice".to_string(),
            password: "hunter22".to_string(),
        };
        let rendered = format!("{:?} {:?}", credentials, register_request());
        assert!(!rendered.contains("hunter22"));
        assert!(!rendered.contains("correct horse"));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            balance: Decimal::from(25_000),
            wallet: None,
        };
        assert_eq!(user.display_name(), "alice");

        let named = User {
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            ..user
        };
        assert_eq!(named.display_name(), "Alice Liddell");
    }

    #[test]
    fn test_update_profile_email_validation() {
        let request = UpdateProfileRequest {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        assert!(UpdateProfileRequest::default().validate().is_ok());
        assert!(UpdateProfileRequest::default().is_empty());
    }

    #[test]
    fn test_profile_response_deserializes_nested_account() {
        let json = r#"{
            "user": {
                "id": 3,
                "user": {"id": 7, "username": "alice", "email": "a@example.com",
                         "first_name": "Alice", "last_name": "", "date_joined": "2025-06-01T12:00:00Z"},
                "balance": 24500.0,
                "created_at": "2025-06-01T12:00:00Z"
            },
            "message": "Profile updated successfully"
        }"#;

        let response: ProfileUpdateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.user.id, 7);
        assert_eq!(response.user.user.first_name, "Alice");
        assert_eq!(response.user.balance, Decimal::from(24_500));
    }
}
