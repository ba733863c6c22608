#![allow(dead_code)]

use api::{build_app, init_domain_services, init_domain_services_with_sources};
use config::ApiConfig;
use services::common::{MockClock, MockIdGenerator};
use std::sync::Arc;

pub const API_PREFIX: &str = "/api/v1";
pub const FIXED_ID: &str = "00000000-0000-4000-8000-000000000001";
pub const FIXED_CREATED: i64 = 1_700_000_000;

/// Helper function to create a test configuration
pub fn test_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0; // Use port 0 to get a random available port
    config.logging.level = "debug".to_string();
    config.logging.format = "compact".to_string();
    config
}

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::level_filters::LevelFilter::DEBUG)
        .try_init();
}

/// Setup a test server backed by the real clock and UUID generator
pub fn setup_test_server() -> axum_test::TestServer {
    setup_test_server_with_config(test_config())
}

pub fn setup_test_server_with_config(config: ApiConfig) -> axum_test::TestServer {
    init_test_tracing();

    let app_state = init_domain_services(&config.mock);
    let app = build_app(app_state, &config);
    axum_test::TestServer::new(app).unwrap()
}

/// Setup a test server whose responses carry `FIXED_ID` and `FIXED_CREATED`
pub fn setup_deterministic_test_server() -> axum_test::TestServer {
    init_test_tracing();

    let mut clock = MockClock::new();
    clock.expect_now_unix_seconds().return_const(FIXED_CREATED);
    let mut ids = MockIdGenerator::new();
    ids.expect_generate_id().returning(|| FIXED_ID.to_string());

    let config = test_config();
    let app_state =
        init_domain_services_with_sources(&config.mock, Arc::new(clock), Arc::new(ids));
    let app = build_app(app_state, &config);
    axum_test::TestServer::new(app).unwrap()
}

pub fn path(suffix: &str) -> String {
    format!("{API_PREFIX}{suffix}")
}
