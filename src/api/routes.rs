use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{make_request_span, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// `OPTIONS` preflights, including `OPTIONS /recomendar`, are answered by the
/// CORS layer.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/recomendar", post(handlers::recommend))
        .route("/juego/:name", get(handlers::get_game))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(cors_layer())
                .map_response(IntoResponse::into_response)
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span)),
        )
        .with_state(state)
}

/// Cross-origin access from any origin, with any method and header
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
