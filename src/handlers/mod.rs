//! Handlers module - HTTP endpoints
//!
//! Every handler makes exactly one use-case call and maps the result to a response.
//! Business rules live in `crate::domain`.

pub mod enrollment;
pub mod gathering;
pub mod member;

pub use enrollment::{enroll_gathering, get_enrolled_count, get_enrollment_list};
pub use gathering::{
    decide_proceed_or_not, finish_gathering, get_gathering_data, get_gatherings_near_spot,
    post_new_gathering, update_gathering_amount, update_gathering_as_deleted,
};
pub use member::{get_my_profile, update_nickname, update_profile_image};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
