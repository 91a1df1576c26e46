#![allow(dead_code)]

use axum_test::TestServer;
use axum_test::http::HeaderName;
use plogging_buddy::core::{AppState, encode_jwt};
use sqlx::MySqlPool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "plogging-buddy-integration-test-secret";

/// Builds an AppState for the tests
///
/// # Arguments
/// * `pool` - MySQL pool created by `#[sqlx::test]`
pub fn create_test_state(pool: MySqlPool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string()))
}

/// Builds a TestServer around the full application router
pub fn create_test_server(pool: MySqlPool) -> TestServer {
    let app = plogging_buddy::create_router(create_test_state(pool));
    TestServer::new(app).expect("Failed to create test server")
}

/// Signs a token for `member_id` with the test secret
pub fn create_test_jwt(member_id: i64) -> String {
    encode_jwt(member_id, TEST_JWT_SECRET).expect("Failed to create JWT token")
}

pub fn authorization() -> HeaderName {
    HeaderName::from_static("authorization")
}

pub fn bearer(member_id: i64) -> String {
    format!("Bearer {}", create_test_jwt(member_id))
}
