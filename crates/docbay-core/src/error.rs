//! Error types for docbay operations.

use thiserror::Error;

/// Result type alias for docbay operations.
pub type DocbayResult<T> = Result<T, DocbayError>;

/// Main error type for all docbay operations.
#[derive(Error, Debug)]
pub enum DocbayError {
    /// PDF parsing or text extraction failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Output document emission failed.
    #[error("Document error: {0}")]
    Document(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record or file not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DocbayError {
    /// Create a database error from any displayable source.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create a PDF error from any displayable source.
    pub fn pdf(message: impl Into<String>) -> Self {
        Self::Pdf(message.into())
    }

    /// Create a document error from any displayable source.
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }
}
