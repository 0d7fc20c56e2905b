//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use workforce_api::config::{AppConfig, AuthConfig, ListenerConfig, ObservabilityConfig};
use workforce_api::{AppState, HttpServer, Listener};

/// Signing secret shared by every test server, so tests can mint their
/// own tokens when they need one with specific claims.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Start a server on an ephemeral port and return its address together
/// with the shared state for direct store access (seeding, deactivation).
pub async fn spawn_server() -> (SocketAddr, Arc<AppState>) {
    let config = AppConfig {
        listener: ListenerConfig {
            bind_address: "127.0.0.1:0".into(),
            max_connections: 64,
        },
        auth: AuthConfig {
            signing_secret: TEST_SECRET.into(),
            token_ttl_secs: 3600,
        },
        observability: ObservabilityConfig::default(),
    };

    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let state = server.state();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    (addr, state)
}

/// Register a user through the API and return the issued token.
#[allow(dead_code)]
pub async fn register_and_token(
    client: &reqwest::Client,
    addr: SocketAddr,
    email: &str,
) -> String {
    let response = client
        .post(format!("http://{addr}/api/auth/register"))
        .json(&serde_json::json!({
            "firstName": "Test",
            "lastName": "User",
            "email": email,
            "password": "longenough",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}
