//! Image hosting endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use docbay_core::models::ImageRecord;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upload an image.
/// POST /api/images/upload
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ImageRecord>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            Some("description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read field: {}", e)))?;
                if !text.is_empty() {
                    description = Some(text);
                }
            }
            _ => {}
        }
    }

    let (filename, content_type, bytes) =
        file.ok_or_else(|| ApiError::bad_request("Missing file field"))?;

    if !content_type.starts_with("image/") {
        warn!(content_type = %content_type, "rejected non-image upload");
        return Err(ApiError::bad_request("Only image files may be uploaded"));
    }

    let mut new_image = state
        .inner
        .image_storage
        .save(&filename, &content_type, bytes)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store image: {}", e)))?;
    new_image.description = description;

    let record = state.inner.images.insert(new_image).map_err(ApiError::from)?;
    info!(id = record.id, "image uploaded");

    Ok((StatusCode::CREATED, Json(record)))
}

/// List all images, newest first.
/// GET /api/images
pub async fn list_images(State(state): State<AppState>) -> ApiResult<Json<Vec<ImageRecord>>> {
    let records = state.inner.images.list().map_err(ApiError::from)?;
    Ok(Json(records))
}

/// Get a single image record.
/// GET /api/images/:id
pub async fn get_image(
    State(state): State<AppState>,
    Path(image_id): Path<i64>,
) -> ApiResult<Json<ImageRecord>> {
    let record = state
        .inner
        .images
        .get(image_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Image not found"))?;

    Ok(Json(record))
}

/// Delete an image: backing file first, then the database row.
/// DELETE /api/images/:id
pub async fn delete_image(
    State(state): State<AppState>,
    Path(image_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let record = state
        .inner
        .images
        .get(image_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Image not found"))?;

    let file_path = state.inner.image_storage.resolve(&record.file_path);
    if file_path.exists() {
        tokio::fs::remove_file(&file_path)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to delete image file: {}", e)))?;
    }

    state.inner.images.delete(image_id).map_err(ApiError::from)?;
    info!(id = image_id, "image deleted");

    Ok(StatusCode::NO_CONTENT)
}
