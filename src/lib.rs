//! Plogging buddy server library - exposes the modules used by main and the integration tests

pub mod core;
pub mod domain;
pub mod dtos;
pub mod entities;
pub mod handlers;
pub mod repositories;
pub mod usecases;

pub use crate::core::{AppError, AppState, Config};
pub use handlers::root;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/gathering", configure_gathering_routes(state.clone()))
        .nest("/enrollment", configure_enrollment_routes(state.clone()))
        .nest("/member", configure_member_routes(state.clone()))
        .with_state(state)
}

/// Gathering routes. The spot search is public, everything else needs a token.
fn configure_gathering_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::handlers::*;

    let public_routes = Router::new().route(
        "/spot/{latitude}/{longitude}",
        get(get_gatherings_near_spot),
    );

    let member_routes = Router::new()
        .route("/new", post(post_new_gathering))
        .route("/{post_id}", get(get_gathering_data))
        .route("/delete", post(update_gathering_as_deleted))
        .route("/update", post(update_gathering_amount))
        .route("/gathering-finish/{post_id}", put(finish_gathering))
        .route("/status-decision", put(decide_proceed_or_not))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(member_routes)
}

fn configure_enrollment_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::handlers::*;

    Router::new()
        .route("/{post_id}", post(enroll_gathering).get(get_enrollment_list))
        .route("/{post_id}/count", get(get_enrolled_count))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_member_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::handlers::*;

    Router::new()
        .route("/me", get(get_my_profile))
        .route("/nickname", put(update_nickname))
        .route("/profile-image", put(update_profile_image))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
