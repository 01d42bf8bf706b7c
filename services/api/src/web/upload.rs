//! services/api/src/web/upload.rs
//!
//! Accepts a single image over multipart/form-data, persists it under a
//! collision-resistant generated name, and returns the relative URL that
//! other resources store in their image fields. Uploads are never
//! deduplicated or garbage-collected when a referencing record is deleted.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;

/// Hard ceiling on upload size; also enforced at the body-limit layer.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
}

/// POST /admin/upload - Store one image file
#[utoipa::path(
    post,
    path = "/admin/upload",
    request_body(content_type = "multipart/form-data", description = "A single 'file' field holding an image."),
    responses(
        (status = 200, description = "Stored file reference", body = UploadResponse),
        (status = 400, description = "No file field, wrong content type, or too large")
    ),
    security(("bearer_token" = []))
)]
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err((
                StatusCode::BAD_REQUEST,
                "Only image uploads are accepted".to_string(),
            ));
        }

        // Keep the original extension; the rest of the name is generated.
        let extension = field
            .file_name()
            .and_then(|name| FsPath::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let data = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Failed to read file bytes: {}", e),
            )
        })?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err((
                StatusCode::BAD_REQUEST,
                "File exceeds the 10MB upload limit".to_string(),
            ));
        }

        let filename = format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            extension
        );
        let path = state.config.uploads_dir.join(&filename);
        tokio::fs::write(&path, &data).await.map_err(|e| {
            error!("Failed to persist upload {:?}: {:?}", path, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store file".to_string(),
            )
        })?;

        return Ok(Json(UploadResponse {
            url: format!("/uploads/{filename}"),
            filename,
        }));
    }

    Err((
        StatusCode::BAD_REQUEST,
        "Multipart form must include a 'file' field".to_string(),
    ))
}
