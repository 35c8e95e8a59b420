//! HTTP route handlers for the prediction server.

pub mod docs;
pub mod predict;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::ServerState;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// GET / - Sends browsers to the interactive docs.
pub async fn root(State(state): State<Arc<ServerState>>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, state.config.docs_path.clone())]).into_response()
}
