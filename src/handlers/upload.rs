//! Image upload: stores a multipart `image` field in the upload directory and returns its public path.

use crate::error::AppError;
use crate::model::entity_by_upload_kind;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

/// Multipart field holding the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_path: String,
    /// Same value as `file_path`, kept for clients that read `imageUrl`.
    pub image_url: String,
    pub filename: String,
}

impl UploadResponse {
    fn new(message: String, filename: String) -> Self {
        let path = public_path(&filename);
        UploadResponse {
            message,
            file_path: path.clone(),
            image_url: path,
            filename,
        }
    }
}

/// POST /api/upload/:kind
pub async fn upload_entity_image(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let entity = entity_by_upload_kind(&kind).ok_or_else(|| AppError::NotFound(format!("upload target '{}'", kind)))?;
    let filename = store_image(&state, multipart).await?;
    tracing::info!(entity = entity.label, %filename, "image uploaded");
    Ok((
        StatusCode::OK,
        Json(UploadResponse::new(
            format!("{} image uploaded successfully", entity.label),
            filename,
        )),
    ))
}

/// POST /api/images/upload
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let filename = store_image(&state, multipart).await?;
    tracing::info!(%filename, "image uploaded");
    Ok((
        StatusCode::OK,
        Json(UploadResponse::new("Image uploaded successfully".to_string(), filename)),
    ))
}

async fn store_image(state: &AppState, mut multipart: Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let is_image = field.content_type().map(|ct| ct.starts_with("image/")).unwrap_or(false);
        if !is_image {
            return Err(AppError::BadRequest("only image files allowed".into()));
        }
        let original = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await.map_err(|e| AppError::BadRequest(e.body_text()))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("empty image".into()));
        }
        if data.len() > state.config.max_upload_bytes {
            return Err(AppError::BadRequest(format!(
                "image exceeds {} bytes",
                state.config.max_upload_bytes
            )));
        }

        let filename = stored_file_name(
            IMAGE_FIELD,
            &original,
            chrono::Utc::now().timestamp_millis(),
            &uuid::Uuid::new_v4().simple().to_string()[..12],
        );
        tokio::fs::create_dir_all(&state.config.upload_dir).await?;
        tokio::fs::write(state.config.upload_dir.join(&filename), &data).await?;
        return Ok(filename);
    }
    Err(AppError::BadRequest(format!("no '{}' file provided", IMAGE_FIELD)))
}

/// `<field>-<millis>-<unique>.<ext>`; the extension is kept only if it is short and alphanumeric.
fn stored_file_name(field: &str, original: &str, millis: i64, unique: &str) -> String {
    let ext = std::path::Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{}-{}-{}{}", field, millis, unique, ext)
}

fn public_path(filename: &str) -> String {
    format!("/uploads/{}", filename)
}
