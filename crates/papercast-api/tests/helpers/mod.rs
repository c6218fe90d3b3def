//! Shared test helpers for API integration tests.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use papercast_api::setup;
use papercast_core::upload::BYTES_PER_MB;
use papercast_core::{Config, ConvertMode, VoicePreset};

pub const TEST_MOCK_AUDIO_URL: &str = "https://demo.papercast.test/audio/sample.mp3";

/// Upload ceiling used in tests, kept small so oversize cases stay fast.
pub const TEST_MAX_UPLOAD_MB: u64 = 1;

pub fn create_test_config(convert_mode: ConvertMode, backend_url: &str) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        convert_mode,
        backend_url: backend_url.to_string(),
        backend_timeout_secs: 5,
        max_upload_size_bytes: TEST_MAX_UPLOAD_MB * BYTES_PER_MB,
        default_voice: VoicePreset::FemaleWarm,
        default_duration_minutes: 5,
        mock_audio_url: TEST_MOCK_AUDIO_URL.to_string(),
    }
}

/// Build a test server from the given config, skipping telemetry init so
/// multiple tests can run in one process.
pub fn build_test_app(config: Config) -> TestServer {
    let state = setup::build_state(&config).expect("Failed to build test state");
    let app = setup::routes::setup_routes(&config, state).expect("Failed to build test routes");
    TestServer::new(app).expect("Failed to create test server")
}

/// Gateway in mock mode.
pub fn setup_test_app() -> TestServer {
    build_test_app(create_test_config(ConvertMode::Mock, "http://localhost:8000"))
}

/// Gateway in proxy mode pointed at the given backend address.
pub fn setup_proxy_app(backend_url: &str) -> TestServer {
    build_test_app(create_test_config(ConvertMode::Proxy, backend_url))
}

/// Serve a stub backend router on an ephemeral port and return its base URL.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("stub backend has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("stub backend stopped unexpectedly");
    });

    format!("http://{}", addr)
}
