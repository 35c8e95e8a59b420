//! Route table and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use diabetes_docs::{docs_router, DocsConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::handlers;
use crate::openapi::API_TITLE;
use crate::ServerState;

/// Builds the application router over shared state.
pub fn build(state: Arc<ServerState>) -> Router {
    let docs = docs_router(&DocsConfig {
        title: API_TITLE.into(),
        docs_path: state.config.docs_path.clone(),
        spec_url: state.config.spec_path.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/predict", post(handlers::predict::predict))
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(&state.config.spec_path, get(handlers::docs::api_spec))
        .merge(docs)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
