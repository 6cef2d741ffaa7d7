use common::Reactor;
use tracing::{error, info, instrument, trace};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::session::Session;

impl ApiClient {
    /// Get all active reactors, in catalog order.
    #[instrument(skip_all)]
    pub async fn list_reactors(&self, session: &Session) -> Result<Vec<Reactor>> {
        trace!("Fetching all reactors");
        let result: Result<Vec<Reactor>> = self.get_list("/reactors/", Some(session)).await;
        match &result {
            Ok(reactors) => info!("Fetched {} reactors", reactors.len()),
            Err(e) => error!("Failed to fetch reactors: {}", e),
        }
        result
    }

    /// Get a specific reactor by ID
    #[instrument(skip(self, session))]
    pub async fn get_reactor(&self, session: &Session, reactor_id: i32) -> Result<Reactor> {
        trace!("Fetching reactor with ID: {}", reactor_id);
        let result: Result<Reactor> = self
            .get(&format!("/reactors/{}/", reactor_id), Some(session))
            .await
            .map_err(|e| match e.status() {
                Some(404) => ClientError::UnknownReactor(reactor_id),
                _ => e,
            });
        match &result {
            Ok(reactor) => info!("Fetched reactor: {} (ID: {})", reactor.name, reactor.id),
            Err(e) => error!("Failed to fetch reactor {}: {}", reactor_id, e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestUser, spawn_fake_backend};

    #[tokio::test]
    async fn test_list_reactors_unwraps_page() {
        let backend = spawn_fake_backend().await.unwrap();
        let client = ApiClient::new(backend.base_url());
        let session = TestUser::new("alice").register(&client).await.unwrap();

        let reactors = client.list_reactors(&session).await.unwrap();

        let names: Vec<&str> = reactors.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["NuWave", "Phoenix RegenX-7", "Nexus CORE", "Fermi-III", "Helios FusionDrive"]
        );
        assert!(reactors[4].annual_roi_rate.is_sign_negative());
    }

    #[tokio::test]
    async fn test_get_reactor() {
        let backend = spawn_fake_backend().await.unwrap();
        let client = ApiClient::new(backend.base_url());
        let session = TestUser::new("alice").register(&client).await.unwrap();

        let reactor = client.get_reactor(&session, 2).await.unwrap();

        assert_eq!(reactor.name, "Phoenix RegenX-7");
        assert_eq!(reactor.slug, "phoenix_regenx7");
    }

    #[tokio::test]
    async fn test_unknown_reactor() {
        let backend = spawn_fake_backend().await.unwrap();
        let client = ApiClient::new(backend.base_url());
        let session = TestUser::new("alice").register(&client).await.unwrap();

        let err = client.get_reactor(&session, 42).await.unwrap_err();

        assert!(matches!(err, ClientError::UnknownReactor(42)));
    }
}
