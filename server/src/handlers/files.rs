//! Upload, download and delete of license PDFs

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use licvault::storage::{is_pdf_name, validate_name};

use crate::error::ApiError;
use crate::models::{DeleteResponse, UploadResponse};
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Stores every uploaded `.pdf`. Other files, and fields that carry no
/// filename (reported by field name), are listed as skipped.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    validate_name(&project)?;

    let mut response = UploadResponse::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Upload error: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            let name = field.name().unwrap_or_default().to_string();
            tracing::info!(project = %project, field = %name, "Skipping field without a filename");
            response.skipped.push(name);
            continue;
        };

        if !is_pdf_name(&filename) || validate_name(&filename).is_err() {
            tracing::info!(project = %project, filename = %filename, "Skipping upload");
            response.skipped.push(filename);
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Read error: {}", e)))?;

        let storage_state = Arc::clone(&state);
        let target_project = project.clone();
        let target_name = filename.clone();
        tokio::task::spawn_blocking(move || {
            storage_state
                .storage
                .save(&target_project, &target_name, &data)
        })
        .await??;

        response.uploaded.push(filename);
    }

    Ok(Json(response))
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    Path((project, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let name = filename.clone();
    let content = tokio::task::spawn_blocking(move || state.storage.read(&project, &name)).await??;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        filename.replace(['"', '\\'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    ))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path((project, filename)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tokio::task::spawn_blocking(move || state.storage.delete(&project, &filename)).await??;

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
    }))
}
