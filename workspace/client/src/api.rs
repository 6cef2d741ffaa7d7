use std::time::Duration;

use common::Page;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, trace, warn};

use crate::error::{ClientError, Result};
use crate::session::Session;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// HTTP client for a single NuChain backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Collection endpoints answer with a page envelope, or a bare array when
/// pagination is disabled on the backend.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Paged(Page<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    fn into_results(self) -> Vec<T> {
        match self {
            Listing::Paged(page) => page.results,
            Listing::Plain(results) => results,
        }
    }
}

impl ApiClient {
    /// Create a client for `base_url`, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str, session: Option<&Session>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(endpoint));
        match session {
            Some(session) => builder.bearer_auth(session.access_token()),
            None => builder,
        }
    }

    /// Common GET request handler
    pub(crate) async fn get<T>(&self, endpoint: &str, session: Option<&Session>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, endpoint, session);
        self.send(Method::GET, endpoint, builder).await
    }

    /// GET a collection and unwrap its page envelope.
    pub(crate) async fn get_list<T>(&self, endpoint: &str, session: Option<&Session>) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let listing: Listing<T> = self.get(endpoint, session).await?;
        Ok(listing.into_results())
    }

    /// Common POST request handler
    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B, session: Option<&Session>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, endpoint, session).json(body);
        self.send(Method::POST, endpoint, builder).await
    }

    /// Common PUT request handler
    pub(crate) async fn put<T, B>(&self, endpoint: &str, body: &B, session: Option<&Session>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, endpoint, session).json(body);
        self.send(Method::PUT, endpoint, builder).await
    }

    /// Common DELETE request handler
    pub(crate) async fn delete<T>(&self, endpoint: &str, session: Option<&Session>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let builder = self.request(Method::DELETE, endpoint, session);
        self.send(Method::DELETE, endpoint, builder).await
    }

    async fn send<T>(&self, method: Method, endpoint: &str, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("{} request to: {}", method, self.url(endpoint));

        let response = builder.send().await.map_err(|e| {
            error!("{} {} - Request failed: {}", method, endpoint, e);
            ClientError::from(e)
        })?;

        let response = Self::ensure_success(&method, endpoint, response).await?;

        trace!("{} {} - Response received, parsing JSON", method, endpoint);
        let parsed = response.json::<T>().await.map_err(|e| {
            error!("{} {} - Failed to parse response: {}", method, endpoint, e);
            ClientError::from(e)
        })?;

        debug!("{} {} - Success", method, endpoint);
        Ok(parsed)
    }

    /// Returns the response unchanged on success, or an [`ClientError::Api`]
    /// carrying the backend's error message.
    async fn ensure_success(method: &Method, endpoint: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!("{} {} - Non-OK response: {}", method, endpoint, status);
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP error: {}", status))
        });

        error!("{} {} - API error: {}", method, endpoint, message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Understands `{"error": ...}`, `{"detail": ...}` and `{"message": ...}`,
/// then falls back to the first field error of a validation response such
/// as `{"email": ["Enter a valid email address."]}`.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["error", "detail", "message"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    object.iter().find_map(|(field, errors)| {
        let first = match errors {
            Value::Array(items) => items.first()?.as_str()?,
            Value::String(text) => text.as_str(),
            _ => return None,
        };
        if field == "non_field_errors" {
            Some(first.to_string())
        } else {
            Some(format!("{}: {}", field, first))
        }
    })
}
