//! Route table and middleware stack.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handlers::{accounts, health, posts, unknown_endpoint};
use crate::state::AppState;

/// Builds the full application: routes, `x-request-id`, tracing and CORS.
pub fn router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/health", get(health))
        .route("/accounts", post(accounts::register).get(accounts::list))
        .route("/accounts/{id}", get(accounts::get).delete(accounts::delete))
        .route("/sessions", post(accounts::login))
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/{id}", get(posts::get).delete(posts::delete))
        .route("/posts/{id}/like", post(posts::like))
        .route("/posts/{id}/dislike", post(posts::dislike))
        .route("/posts/{id}/comments", post(posts::add_comment))
        .route(
            "/posts/{id}/comments/{comment_id}",
            axum::routing::delete(posts::delete_comment),
        )
        .fallback(unknown_endpoint)
        .layer(middleware)
        .with_state(state)
}
