//! docbay-core - Core types, storage and conversion pipeline for docbay.
//!
//! Provides the SQLite-backed record stores, the image file storage helper,
//! the PDF-to-Word conversion pipeline, configuration, and the trait seams
//! (`Refine`, `Index`) implemented by docbay-llm.
//!
//! # Example
//!
//! ```ignore
//! use docbay_core::pipeline::PdfConverter;
//!
//! let converter = PdfConverter::new("uploads", "outputs")?;
//! let pdf_path = converter.save_upload("report.pdf", bytes).await?;
//! let outcome = converter.convert(&pdf_path, None).await?;
//! println!("{} pages -> {}", outcome.page_count, outcome.output_path.display());
//! ```

pub mod config;
pub mod error;
pub mod images;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use config::{IndexerConfig, RefinerConfig, ServerConfig};
pub use error::{DocbayError, DocbayResult};
pub use images::ImageStorage;
pub use models::{ConversionRecord, ImageRecord, NewConversion, NewImage};
pub use pipeline::{ConversionOutcome, PdfConverter};
pub use store::{ConversionStore, ImageStore};
pub use traits::{Index, Refine};
