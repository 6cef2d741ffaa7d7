use std::time::Duration;

use anyhow::{Context, Result};
use client::ApiClient;
use client::api::DEFAULT_API_BASE_URL;
use serde::Deserialize;
use tracing::debug;

/// Runtime configuration, layered from defaults, an optional `nuchain.toml`
/// in the working directory and `NUCHAIN_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Backend base URL, including the `/api` prefix
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Load configuration
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(
            config::File::with_name("nuchain").required(false),
            config::Environment::with_prefix("NUCHAIN"),
        )
    }

    fn from_sources<F, E>(file: F, environment: E) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_secs", Self::DEFAULT_TIMEOUT_SECS)?
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Replace the base URL when one was given on the command line.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url {
            self.api_base_url = api_url;
        }
        self
    }

    pub fn build_client(&self) -> Result<ApiClient> {
        ApiClient::with_timeout(
            self.api_base_url.clone(),
            Duration::from_secs(self.request_timeout_secs),
        )
        .context("Failed to build HTTP client")
    }
}
