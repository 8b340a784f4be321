// src/routes/frontend.rs
use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::SharedState;

/// The single-page frontend: the three bundle files at the root, plus the
/// whole directory under `/static`.
pub fn routes(dir: &Path) -> Router<SharedState> {
    Router::new()
        .route_service("/", ServeFile::new(dir.join("index.html")))
        .route_service("/style.css", ServeFile::new(dir.join("style.css")))
        .route_service("/app.js", ServeFile::new(dir.join("app.js")))
        .nest_service("/static", ServeDir::new(dir))
}
