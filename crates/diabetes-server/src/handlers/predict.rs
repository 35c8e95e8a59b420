//! Prediction HTTP handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use diabetes_core::{PredictError, Prediction};
use serde_json::Value;
use tracing::info;

use crate::error::AppError;
use crate::ServerState;

/// POST /predict - Classifies one patient record.
///
/// The body is parsed as JSON whatever its declared content type, so parse
/// failures come back in the same error envelope as validation failures.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<Prediction>, AppError> {
    // Checked before parsing so an unavailable pipeline is a 500 even for unparsable bodies.
    if !state.adapter.is_ready() {
        return Err(PredictError::ArtifactUnavailable.into());
    }

    let value: Value = serde_json::from_slice(&body)?;
    let label = state.adapter.predict_json(&value)?;

    info!("Predicted class {}", label.as_class());
    Ok(Json(Prediction::from(label)))
}
