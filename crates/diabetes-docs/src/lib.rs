//! Interactive API documentation for the diabetes prediction server.
//!
//! Serves a Swagger UI shell that renders the server's static API
//! description. The page and its stylesheet are embedded in the binary;
//! the Swagger UI bundle itself is loaded from a CDN by the browser.

use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Where the docs live and what they render.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Page title.
    pub title: String,
    /// Route the docs are mounted at, e.g. `/swagger`.
    pub docs_path: String,
    /// URL of the API description document the page loads.
    pub spec_url: String,
}

/// Builds the docs routes, mounted at `config.docs_path`.
pub fn docs_router<S>(config: &DocsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let index: Option<Arc<str>> = render_index(config).map(Arc::from);
    let base = config.docs_path.trim_end_matches('/');

    let page = move || {
        let index = index.clone();
        async move {
            match index {
                Some(html) => Html(html.to_string()).into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }
    };

    Router::new()
        .route(base, get(page.clone()))
        .route(&format!("{}/", base), get(page.clone()))
        .route(&format!("{}/index.html", base), get(page))
        .route(&format!("{}/{{*file}}", base), get(asset))
}

fn render_index(config: &DocsConfig) -> Option<String> {
    let file = Assets::get("index.html")?;
    let template = String::from_utf8_lossy(&file.data);
    Some(
        template
            .replace("{{title}}", &config.title)
            .replace("{{docs_path}}", config.docs_path.trim_end_matches('/'))
            .replace("{{spec_url}}", &config.spec_url),
    )
}

async fn asset(Path(file): Path<String>) -> Response {
    match Assets::get(&file) {
        Some(content) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref().to_string())], content.data.into_owned()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
