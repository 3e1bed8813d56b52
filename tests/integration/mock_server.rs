//! Mock HTTP server setup for integration tests

use mockito::{Mock, Server, ServerGuard};
use server_caps::{CapabilityClient, CapabilityClientBuilder, ClientConfig};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const API_KEY: &str = "API-TESTKEY";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Client pointed at the mock server, independent of the process environment
    pub fn create_test_client(&self) -> CapabilityClient {
        CapabilityClientBuilder::from_config(ClientConfig::default())
            .base_url(&self.base_url)
            .api_key(API_KEY)
            .timeout_secs(5)
            .build()
            .expect("Failed to build client")
    }

    /// Root document with the given version and link names
    pub async fn mock_root(&self, version: &str, links: &[&str], hits: usize) -> Mock {
        let links: serde_json::Map<String, serde_json::Value> = links
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    serde_json::Value::String(format!("/api/{}", name.to_lowercase())),
                )
            })
            .collect();
        let body = serde_json::json!({
            "Application": "Server",
            "Version": version,
            "ApiVersion": "3.0.0",
            "Links": links,
        });

        let mut server = self.server.lock().await;
        server
            .mock("GET", "/api")
            .match_header("x-api-key", API_KEY)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await
    }

    /// Root document request answered with an error status
    pub async fn mock_root_error(&self, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", "/api")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }
}
