//! PDF conversion pipeline: extraction, document reconstruction,
//! orchestration.

mod converter;
mod document;
mod extract;

pub use converter::{ConversionOutcome, PdfConverter};
pub use document::{write_document, write_error_document};
pub use extract::{extract_pages, PdfPages};
