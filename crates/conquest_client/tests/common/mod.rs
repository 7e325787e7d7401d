//! Shared test utilities for conquest_client integration tests

use std::net::SocketAddr;

use axum::Router;
use conquest_client::Token;
use conquest_mock::prelude::*;
use tokio::net::TcpListener;

pub const USERNAME: &str = "conquest";
pub const PASSWORD: &str = "conquest";
pub const CONNECTION: &str = "Test";

/// A running fixture server.
#[allow(dead_code)]
pub struct TestServer {
    pub state: MockState,
    pub addr: SocketAddr,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Opens a session with the default credentials.
    pub async fn token(&self) -> Token {
        Token::create(&self.url(), USERNAME, PASSWORD, CONNECTION)
            .await
            .unwrap()
    }
}

/// Starts a fixture server with the sample records and default config
#[allow(dead_code)]
pub async fn create_test_server() -> TestServer {
    create_test_server_with_config(MockConfig::default()).await
}

/// Starts a fixture server with the sample records and a custom config
#[allow(dead_code)]
pub async fn create_test_server_with_config(config: MockConfig) -> TestServer {
    let (app, state) = MockConquest::new(config).build(Fixtures::sample());
    let addr = spawn_router(app).await;

    TestServer { state, addr }
}

/// Serves any router in the background, returns the bound address
#[allow(dead_code)]
pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}
