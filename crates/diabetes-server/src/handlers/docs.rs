//! API description handler.

use axum::http::header;
use axum::response::IntoResponse;

use crate::openapi::API_SPEC_JSON;

/// GET /static/swagger.json - The static API description document.
pub async fn api_spec() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], API_SPEC_JSON.as_str())
}
