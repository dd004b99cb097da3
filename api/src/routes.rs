use crate::api_error::ApiError;
use crate::suggestion_response::{HealthResponse, SuggestionResponse};
use crate::upload::read_upload;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use journal_scout::SuggestionService;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub struct AppState {
    pub suggestion_service: SuggestionService,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /predict`: one PDF in, the model's journal suggestions out.
async fn predict(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    // Not a multipart body at all, so there is no file field either.
    let multipart = multipart.map_err(|rejection| {
        log::debug!("Multipart rejected: {}", rejection);
        ApiError::NoFile
    })?;

    let document = read_upload(multipart).await?;
    let suggestion = state.suggestion_service.suggest(document).await?;

    Ok(Json(SuggestionResponse {
        suggestions: suggestion.into_text(),
    }))
}

pub fn create_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
