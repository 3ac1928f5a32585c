//! Shared helpers for integration tests.
//!
//! The API client is synchronous (it drives its own runtime per call), so
//! tests run as plain `#[test]` functions and keep one multi-thread tokio
//! runtime alive to serve the wiremock server in the background.

use onride::egui_app::{ApiClient, Config};
use onride::shared::AppConfig;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// A mock backend plus a client pointed at it.
pub struct TestBackend {
    pub rt: Runtime,
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestBackend {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("test runtime");
        let server = rt.block_on(MockServer::start());
        let config = Config::with_builder(AppConfig::builder().server_url(server.uri()))
            .expect("test config");
        let client = ApiClient::new(config);
        Self { rt, server, client }
    }

    /// Mount a mock on the server.
    pub fn mount(&self, mock: wiremock::Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }
}
