//! HTML pages

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};

use crate::error::ApiError;
use crate::models::OpenProjectQuery;
use crate::state::AppState;

use super::load_entries;

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let listing = Arc::clone(&state);
    let projects = tokio::task::spawn_blocking(move || listing.storage.list_projects()).await??;
    Ok(Html(state.templates.render_index(&projects)?))
}

/// Target of the "open project" form.
pub async fn open_project(Query(query): Query<OpenProjectQuery>) -> Result<Redirect, ApiError> {
    let project = query.project.trim();
    licvault::storage::validate_name(project)?;
    Ok(Redirect::to(&format!(
        "/project/{}",
        urlencoding::encode(project)
    )))
}

pub async fn project_page(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
) -> Result<Html<String>, ApiError> {
    let entries = load_entries(Arc::clone(&state), project.clone()).await?;
    tracing::debug!(project = %project, files = entries.len(), "Rendering project page");
    Ok(Html(state.templates.render_project(&project, &entries)?))
}
