use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::TranslateError;
use crate::handler::{TranslationHandler, TranslationOutcome, TranslationRequest};
use crate::i18n::LanguageRegistry;
use crate::ui;

type ApiError = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<TranslationHandler>,
}

impl AppState {
    pub fn new(handler: TranslationHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetectRequest {
    text: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(index))

        // Health check
        .route("/health", get(health_check))

        // API
        .route("/api/languages", get(list_languages))
        .route("/api/detect", post(detect))
        .route("/api/translate", post(translate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(ui::render_index())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_languages() -> Json<Value> {
    let registry = LanguageRegistry::get();
    Json(json!({
        "languages": registry.list_supported(),
        "default": registry.default_target().code,
    }))
}

async fn detect(
    State(state): State<AppState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(bad_request_body)?;

    let detected = state.handler.detect(&request.text).map_err(error_response)?;
    Ok(Json(json!({ "detected_language": detected })))
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationOutcome>, ApiError> {
    let Json(request) = payload.map_err(bad_request_body)?;

    let outcome = state.handler.handle(&request).await.map_err(error_response)?;
    Ok(Json(outcome))
}

/// Convert a handler error into the JSON body the page shows in its error banner.
fn error_response(err: TranslateError) -> ApiError {
    let status = match &err {
        TranslateError::EmptyInput | TranslateError::UnsupportedLanguage(_) => {
            StatusCode::BAD_REQUEST
        }
        TranslateError::Detection(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TranslateError::TranslationService(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        warn!("Request failed: {}", err);
    }

    (
        status,
        Json(json!({
            "error": err.kind(),
            "message": err.to_string(),
        })),
    )
}

fn bad_request_body(rejection: JsonRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_request",
            "message": rejection.body_text(),
        })),
    )
}
