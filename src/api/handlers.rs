use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Game, RecommendationRequest, RecommendationResponse},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "games": state.recommender.dataset().len(),
    }))
}

/// Recommends games similar to the three submitted titles
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    tracing::info!(
        request_id = %request_id,
        title_count = request.juegos.len(),
        "Processing recommendation request"
    );

    let recomendaciones = state.recommender.recommend(&request.juegos)?;

    Ok(Json(RecommendationResponse { recomendaciones }))
}

/// Returns the full record of a game by exact (case-insensitive) name
pub async fn get_game(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Game>> {
    state
        .recommender
        .find_game(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Juego no encontrado".to_string()))
}
