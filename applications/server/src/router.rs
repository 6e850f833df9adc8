/// Route table
use crate::{api, error::ServerError, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

/// Build the `/api` router with token checks on every route except
/// health and identity resolution
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/user/submit", post(api::users::submit_user));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/user/details", get(api::users::get_details))
        .route("/user/check", get(api::users::check_token))
        .route("/jap/check/:date", get(api::jap::check_date))
        .route("/jap/submit", post(api::jap::submit_entry))
        .route("/jap/counts", get(api::jap::get_counts))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(app_state)
}

async fn not_found() -> ServerError {
    ServerError::NotFound("Not found".to_string())
}
