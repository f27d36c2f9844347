//! Construction of the conversion pipeline from configuration.

use std::sync::Arc;

use docbay_core::config::ServerConfig;
use docbay_core::error::DocbayResult;
use docbay_core::pipeline::PdfConverter;
use docbay_llm::{ArtifactIndexer, TextRefiner};
use tracing::info;

/// Build a `PdfConverter`, wiring in the refiner and indexer clients when
/// their configuration is present.
pub fn build_converter(config: &ServerConfig) -> DocbayResult<PdfConverter> {
    let mut converter = PdfConverter::new(&config.pdf_upload_dir, &config.pdf_output_dir)?;

    match &config.refiner {
        Some(refiner_config) => {
            let refiner = TextRefiner::new(refiner_config.clone())?;
            converter = converter.with_refiner(Arc::new(refiner));
        }
        None => info!("no AI refiner configured, conversions will skip refinement"),
    }

    if let Some(indexer_config) = &config.indexer {
        let indexer = ArtifactIndexer::new(indexer_config.clone())?;
        converter = converter.with_indexer(Arc::new(indexer));
    }

    Ok(converter)
}
