//! Prediction handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::domain::{ModelSchema, PredictionForm};
use crate::errors::{AppError, AppResult};
use crate::services::PredictionOutcome;

/// Create prediction routes
pub fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(predict))
        .route("/schema", get(schema))
}

/// Describe the model inputs
#[utoipa::path(
    get,
    path = "/predict/schema",
    tag = "Prediction",
    responses(
        (status = 200, description = "Feature list and categorical levels", body = ModelSchema),
        (status = 401, description = "Not authenticated"),
        (status = 503, description = "Model unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn schema(State(state): State<AppState>) -> AppResult<Json<ModelSchema>> {
    Ok(Json(state.prediction_service.schema().await?))
}

/// Predict sales for one record
#[utoipa::path(
    post,
    path = "/predict",
    tag = "Prediction",
    request_body = PredictionForm,
    responses(
        (status = 200, description = "Predicted sales", body = PredictionOutcome),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Incomplete or invalid form"),
        (status = 503, description = "Model unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionForm>, JsonRejection>,
) -> AppResult<Json<PredictionOutcome>> {
    let Json(form) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    Ok(Json(state.prediction_service.predict(form).await?))
}
