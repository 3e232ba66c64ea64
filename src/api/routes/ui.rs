//! The single-page browser front end.

use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("index.html");

/// GET / - Browser page with the URL form
pub async fn index_page() -> impl IntoResponse {
    Html(INDEX_HTML)
}
