//! HTTP client for the NuChain backend.
//!
//! [`ApiClient`] wraps the REST endpoints, [`Session`] carries the tokens and
//! user returned by login, and [`Dashboard`] is a snapshot of the catalog and
//! the user's investments that the compute core summarizes.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod investments;
pub mod reactors;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::ApiClient;
pub use dashboard::{Dashboard, PortfolioBackend};
pub use error::{ClientError, Result};
pub use session::Session;
