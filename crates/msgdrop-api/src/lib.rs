pub mod error;
pub mod messages;
pub mod middleware;
pub mod users;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

pub use users::{AppState, AppStateInner};

/// All msgdrop routes. Layers that concern the process (tracing, CORS) are
/// added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(users::create_user))
        // layer covers GET only; POST carries its token in the body
        .route(
            "/messages",
            get(messages::list_messages)
                .layer(axum_middleware::from_fn(middleware::require_bearer))
                .post(messages::post_message),
        )
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
