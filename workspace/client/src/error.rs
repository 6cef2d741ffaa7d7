use compute::ValidationError;
use thiserror::Error;

/// Errors from talking to the backend or preparing a request for it.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP request itself failed (connection, TLS, timeout, body decoding)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A form failed local validation and was not sent
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    /// An investment failed the local checks and was not submitted
    #[error("Investment rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("Reactor {0} not found")]
    UnknownReactor(i32),
}

impl ClientError {
    /// HTTP status for [`ClientError::Api`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Type alias for Result with ClientError
pub type Result<T> = std::result::Result<T, ClientError>;
