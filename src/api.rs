//! JSON shell: `POST /paraphrase` and `GET /test-api`.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tracing::Instrument;

use crate::error::ParaphraseError;
use crate::models::{ErrorResponse, ParaphraseParams, ParaphraseResponse, ProbeResponse};
use crate::paraphraser::Paraphraser;

pub const PROBE_SUCCESS_MESSAGE: &str =
    "API key is valid and connection to the provider is working";

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<ParaphraseError> for ApiError {
    fn from(e: ParaphraseError) -> Self {
        Self {
            status: e.http_status(),
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

pub fn router(paraphraser: Arc<Paraphraser>) -> Router {
    Router::new()
        .route("/paraphrase", post(paraphrase))
        .route("/test-api", get(test_api))
        .with_state(paraphraser)
}

async fn paraphrase(
    State(paraphraser): State<Arc<Paraphraser>>,
    payload: Result<Json<ParaphraseParams>, JsonRejection>,
) -> Result<Json<ParaphraseResponse>, ApiError> {
    let Json(params) = payload?;
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("paraphrase", %request_id, shell = "api");

    async move {
        let text = params.text.unwrap_or_default();
        match paraphraser
            .paraphrase(&text, params.academic_level.as_deref())
            .await
        {
            Ok(paraphrased_text) => Ok(Json(ParaphraseResponse { paraphrased_text })),
            Err(e) => {
                tracing::error!("paraphrase error: {}", e);
                Err(e.into())
            }
        }
    }
    .instrument(span)
    .await
}

async fn test_api(State(paraphraser): State<Arc<Paraphraser>>) -> impl IntoResponse {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("test_api", %request_id, shell = "api");

    match paraphraser.check_connection().instrument(span).await {
        Ok(()) => (StatusCode::OK, Json(ProbeResponse::success(PROBE_SUCCESS_MESSAGE))),
        Err(e) => {
            tracing::warn!("connection test failed: {}", e);
            (e.http_status(), Json(ProbeResponse::error(e.to_string())))
        }
    }
}
