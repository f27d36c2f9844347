//! Persisted record types.

use serde::{Deserialize, Serialize};

/// One completed PDF-to-Word conversion.
///
/// Inserted once at conversion time and never updated. `processed_text` and
/// `markdown_path` are present together or not at all: both require a
/// configured refiner that returned output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Record ID.
    pub id: i64,
    /// Filename as uploaded by the caller.
    pub original_filename: String,
    /// Filename of the produced DOCX.
    pub output_filename: String,
    /// Path of the DOCX relative to the output directory.
    pub file_path: String,
    /// Total pages in the source PDF. Zero when extraction failed.
    pub page_count: i64,
    /// Raw extracted text, page-labeled. Empty when extraction failed.
    pub text_content: String,
    /// Refined text returned by the AI refiner. Empty when no refiner ran.
    pub processed_text: String,
    /// Path of the markdown artifact relative to the output directory.
    /// Present exactly when a refiner ran and produced output.
    pub markdown_path: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// One hosted image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Record ID.
    pub id: i64,
    /// Filename as uploaded by the caller.
    pub original_filename: String,
    /// Stored path relative to the image directory (`YYYYMM/uuid.ext`).
    pub file_path: String,
    /// Public URL of the stored image.
    pub url: String,
    /// File size in bytes.
    pub size: i64,
    /// MIME content type.
    pub content_type: String,
    /// Optional caller-supplied description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Field values for inserting a new conversion record.
#[derive(Debug, Clone)]
pub struct NewConversion {
    pub original_filename: String,
    pub output_filename: String,
    pub file_path: String,
    pub page_count: i64,
    pub text_content: String,
    pub processed_text: String,
    pub markdown_path: Option<String>,
}

/// Field values for inserting a new image record.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub original_filename: String,
    pub file_path: String,
    pub url: String,
    pub size: i64,
    pub content_type: String,
    pub description: Option<String>,
}
