//! licvault HTTP server
//!
//! Routes:
//! - HTML pages for browsing projects and their license PDFs
//! - JSON listing of projects and extracted license details
//! - Multipart upload, download and delete of PDFs

pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

pub fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::api::health))
        // Pages
        .route("/", get(handlers::pages::index))
        .route("/open", get(handlers::pages::open_project))
        .route("/project/:project", get(handlers::pages::project_page))
        // JSON API
        .route("/api/projects", get(handlers::api::list_projects))
        .route(
            "/api/project/:project/licenses",
            get(handlers::api::list_licenses),
        )
        // Files
        .route(
            "/project/:project/upload",
            post(handlers::files::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/project/:project/download/:filename",
            get(handlers::files::download),
        )
        .route(
            "/project/:project/delete/:filename",
            delete(handlers::files::delete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
