//! JSON endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::ApiError;
use crate::models::LicenseEntry;
use crate::state::AppState;

use super::load_entries;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let projects = tokio::task::spawn_blocking(move || state.storage.list_projects()).await??;
    Ok(Json(projects))
}

pub async fn list_licenses(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
) -> Result<Json<Vec<LicenseEntry>>, ApiError> {
    let entries = load_entries(state, project).await?;
    Ok(Json(entries))
}
