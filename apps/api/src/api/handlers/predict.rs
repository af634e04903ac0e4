use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::agents::CrewOutput;
use crate::api::errors::ApiError;
use crate::api::state::AppState;

/// Request body for a prediction
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub query: String,
}

/// Response envelope for a prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub output: CrewOutput,
}

/// Extract the query from a decoded request body
///
/// A body that failed to decode (invalid JSON, `query` missing or not a
/// string) is a client error. The query itself is passed on as sent.
pub fn decode(payload: Result<Json<PredictRequest>, JsonRejection>) -> Result<String, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    Ok(req.query)
}

/// Wrap a crew result in the `{"output": ...}` envelope
pub fn encode(output: CrewOutput) -> Json<PredictResponse> {
    Json(PredictResponse { output })
}

/// Research the query and write a response
///
/// POST /predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let query = decode(payload)?;

    let output = state.pipeline.run(&query).await.map_err(|e| {
        tracing::error!("Prediction failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(encode(output))
}
