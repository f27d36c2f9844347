//! PDF conversion endpoints.

use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use docbay_core::models::{ConversionRecord, NewConversion};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Substituted when a record has no extracted text.
const TEXT_PLACEHOLDER: &str = "No text content was extracted from this PDF";

/// Substituted when a record has no AI-processed text.
const PROCESSED_PLACEHOLDER: &str = "This PDF has no AI-processed text";

/// A conversion record augmented with computed download URLs.
#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    #[serde(flatten)]
    pub record: ConversionRecord,
    pub download_url: String,
    pub markdown_url: Option<String>,
}

impl ConversionResponse {
    fn new(record: ConversionRecord, base_url: &str) -> Self {
        let download_url = format!("{}/api/pdfs/download/{}", base_url, record.output_filename);
        let markdown_url = record.markdown_path.as_ref().and_then(|path| {
            let filename = FsPath::new(path).file_name()?.to_str()?;
            Some(format!("{}/api/pdfs/download-markdown/{}", base_url, filename))
        });

        Self {
            record,
            download_url,
            markdown_url,
        }
    }
}

/// Upload a PDF and convert it to a Word document.
/// POST /api/pdfs/convert
pub async fn convert_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ConversionResponse>)> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("document.pdf").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
                file = Some((filename, bytes.to_vec()));
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

    let (filename, bytes) = file.ok_or_else(|| ApiError::bad_request("Missing file field"))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        warn!(filename = %filename, "rejected non-PDF upload");
        return Err(ApiError::bad_request("Only PDF files are accepted"));
    }

    if bytes.is_empty() {
        warn!(filename = %filename, "rejected empty PDF upload");
        return Err(ApiError::bad_request("Uploaded PDF file is empty"));
    }

    info!(filename = %filename, size = bytes.len(), "processing PDF upload");

    let pdf_path = state
        .inner
        .converter
        .save_upload(&filename, bytes)
        .await
        .map_err(ApiError::from)?;

    match run_conversion(&state, &pdf_path, &filename, description.as_deref()).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(e) => {
            // The uploaded source is only kept for successful conversions
            error!(error = %e, "conversion failed, removing uploaded PDF");
            if pdf_path.exists() {
                let _ = tokio::fs::remove_file(&pdf_path).await;
            }
            Err(e)
        }
    }
}

async fn run_conversion(
    state: &AppState,
    pdf_path: &FsPath,
    original_filename: &str,
    description: Option<&str>,
) -> ApiResult<ConversionResponse> {
    let outcome = state
        .inner
        .converter
        .convert(pdf_path, description)
        .await
        .map_err(ApiError::from)?;

    // The pipeline guarantees a file even on its degraded path; a missing
    // or empty file here is fatal
    let output_size = tokio::fs::metadata(&outcome.output_path)
        .await
        .map(|m| m.len())
        .unwrap_or(0);
    if output_size == 0 {
        return Err(ApiError::internal("Failed to generate Word document"));
    }

    let output_filename = file_name_of(&outcome.output_path)?;
    let markdown_path = match &outcome.markdown_path {
        Some(path) if path.exists() => Some(file_name_of(path)?),
        _ => None,
    };

    let record = state
        .inner
        .conversions
        .insert(NewConversion {
            original_filename: original_filename.to_string(),
            output_filename: output_filename.clone(),
            file_path: output_filename,
            page_count: outcome.page_count as i64,
            text_content: outcome.text_content,
            processed_text: outcome.processed_text,
            markdown_path,
        })
        .map_err(ApiError::from)?;

    info!(id = record.id, pages = record.page_count, "conversion recorded");

    Ok(ConversionResponse::new(record, &state.inner.config.base_url))
}

fn file_name_of(path: &FsPath) -> ApiResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .ok_or_else(|| ApiError::internal("Produced artifact has no valid filename"))
}

/// List all conversion records, newest first.
/// GET /api/pdfs
pub async fn list_conversions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ConversionRecord>>> {
    let records = state.inner.conversions.list().map_err(ApiError::from)?;
    Ok(Json(records))
}

/// Get a single conversion record with computed download URLs.
/// GET /api/pdfs/:id
pub async fn get_conversion(
    State(state): State<AppState>,
    Path(conversion_id): Path<i64>,
) -> ApiResult<Json<ConversionResponse>> {
    let record = fetch_record(&state, conversion_id)?;
    Ok(Json(ConversionResponse::new(
        record,
        &state.inner.config.base_url,
    )))
}

/// Get the raw extracted text as plain text.
/// GET /api/pdfs/:id/text
pub async fn get_text(
    State(state): State<AppState>,
    Path(conversion_id): Path<i64>,
) -> ApiResult<String> {
    let record = fetch_record(&state, conversion_id)?;

    if record.text_content.is_empty() {
        return Ok(TEXT_PLACEHOLDER.to_string());
    }

    Ok(record.text_content)
}

/// Get the AI-processed text as plain text.
/// GET /api/pdfs/:id/processed_text
pub async fn get_processed_text(
    State(state): State<AppState>,
    Path(conversion_id): Path<i64>,
) -> ApiResult<String> {
    let record = fetch_record(&state, conversion_id)?;

    if record.processed_text.is_empty() {
        return Ok(PROCESSED_PLACEHOLDER.to_string());
    }

    Ok(record.processed_text)
}

/// Get both text variants as a JSON object, placeholders substituted.
/// GET /api/pdfs/:id/text_json
pub async fn get_text_json(
    State(state): State<AppState>,
    Path(conversion_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let record = fetch_record(&state, conversion_id)?;

    let text_content = if record.text_content.is_empty() {
        TEXT_PLACEHOLDER.to_string()
    } else {
        record.text_content
    };
    let processed_text = if record.processed_text.is_empty() {
        PROCESSED_PLACEHOLDER.to_string()
    } else {
        record.processed_text
    };

    Ok(Json(serde_json::json!({
        "id": record.id,
        "original_filename": record.original_filename,
        "page_count": record.page_count,
        "text_content": text_content,
        "processed_text": processed_text,
    })))
}

/// Download the produced Word document.
/// GET /api/pdfs/download/:filename
pub async fn download_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    serve_artifact(&state, &filename, DOCX_CONTENT_TYPE).await
}

/// Download the markdown artifact.
/// GET /api/pdfs/download-markdown/:filename
pub async fn download_markdown(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    serve_artifact(&state, &filename, "text/markdown").await
}

async fn serve_artifact(
    state: &AppState,
    filename: &str,
    content_type: &'static str,
) -> ApiResult<impl IntoResponse> {
    // Artifact filenames are flat; a separator or parent reference means the
    // path was forged to escape the output directory
    if filename.contains(['/', '\\']) || filename == ".." {
        warn!(filename = %filename, "rejected artifact filename with path components");
        return Err(ApiError::bad_request("Invalid filename"));
    }

    let path = state.inner.converter.output_dir().join(filename);

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::not_found("File not found"))?;

    if bytes.is_empty() {
        warn!(filename = %filename, "serving empty artifact");
    }

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}

/// Delete a conversion: backing files first, then the database row.
/// DELETE /api/pdfs/:id
pub async fn delete_conversion(
    State(state): State<AppState>,
    Path(conversion_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let record = fetch_record(&state, conversion_id)?;
    let output_dir = state.inner.converter.output_dir();

    let document_path = output_dir.join(&record.file_path);
    if document_path.exists() {
        tokio::fs::remove_file(&document_path).await.map_err(|e| {
            ApiError::internal(format!("Failed to delete conversion record: {}", e))
        })?;
    }

    // Markdown is only touched when the record says one exists
    if let Some(ref markdown) = record.markdown_path {
        let markdown_path = output_dir.join(markdown);
        if markdown_path.exists() {
            tokio::fs::remove_file(&markdown_path).await.map_err(|e| {
                ApiError::internal(format!("Failed to delete conversion record: {}", e))
            })?;
        }
    }

    state
        .inner
        .conversions
        .delete(conversion_id)
        .map_err(ApiError::from)?;
    info!(id = conversion_id, "conversion deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn fetch_record(state: &AppState, conversion_id: i64) -> ApiResult<ConversionRecord> {
    state
        .inner
        .conversions
        .get(conversion_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Conversion record not found"))
}
