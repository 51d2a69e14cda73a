//! Router configuration.

use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// API routes, to be nested under `/api`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(crate::api::handlers::chat::chat))
        .route("/chat/history", post(crate::api::handlers::history::history))
        .route(
            "/memory/{user_id}",
            get(crate::api::handlers::memory::get_memory),
        )
        .route(
            "/clear/{user_id}",
            post(crate::api::handlers::memory::clear_user),
        )
        .route("/health", get(crate::api::handlers::health::health))
}

/// The full application router with middleware applied.
pub fn app(state: AppState) -> Router {
    let router = Router::new().nest("/api", create_router());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", <crate::api::ApiDoc as utoipa::OpenApi>::openapi()),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
