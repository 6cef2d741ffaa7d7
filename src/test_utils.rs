#[cfg(test)]
pub mod test_utils {
    use client::ApiClient;
    use client::testing::{FakeBackend, TestUser, spawn_fake_backend};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::cli::Credentials;

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG and defaults to WARN. The returned
    /// guard removes the subscriber when dropped.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Start a fake backend and a client pointed at it.
    pub async fn setup_test_backend() -> (FakeBackend, ApiClient) {
        let backend = spawn_fake_backend()
            .await
            .expect("Failed to start fake backend");
        let client = ApiClient::new(backend.base_url());
        (backend, client)
    }

    /// Register `username` and return the credentials the commands log in with.
    pub async fn register_test_user(client: &ApiClient, username: &str) -> Credentials {
        let user = TestUser::new(username);
        let session = user
            .register(client)
            .await
            .expect("Failed to register test user");
        client.logout(session).await.expect("Failed to log out test user");

        Credentials {
            username: Some(user.username),
            password: Some(user.password),
        }
    }
}
