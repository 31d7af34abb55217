//! HTTP handlers for the licvault server

pub mod api;
pub mod files;
pub mod pages;

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::LicenseEntry;
use crate::state::AppState;

/// Lists a project's PDFs and extracts each one on the blocking pool.
pub(crate) async fn load_entries(
    state: Arc<AppState>,
    project: String,
) -> Result<Vec<LicenseEntry>, ApiError> {
    let extracted = tokio::task::spawn_blocking(move || {
        state.extractor.extract_project(&state.storage, &project)
    })
    .await??;

    Ok(extracted
        .into_iter()
        .map(|(file, info)| LicenseEntry::new(file, info))
        .collect())
}
