//! Conversion orchestrator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{DocbayError, DocbayResult};
use crate::pipeline::document;
use crate::pipeline::extract::{self, PdfPages};
use crate::traits::{Index, Refine};

/// Result of one conversion run.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Path of the produced DOCX. Always exists on disk when `convert`
    /// returns Ok, even when the pipeline degraded to an error document.
    pub output_path: PathBuf,
    /// Total pages in the source. Zero on the degraded path.
    pub page_count: usize,
    /// Page-labeled full extracted text. Empty on the degraded path.
    pub text_content: String,
    /// Refiner output. Empty when no refiner is configured, the extracted
    /// text was empty, or the pipeline degraded.
    pub processed_text: String,
    /// Path of the markdown artifact, present only when the refiner ran.
    pub markdown_path: Option<PathBuf>,
}

/// Sequences one PDF conversion: extraction, document reconstruction,
/// optional AI refinement and markdown emission, best-effort indexing.
///
/// Strictly sequential and single-document; no retries, no internal
/// parallelism. Blocking PDF/DOCX work runs under `spawn_blocking`.
pub struct PdfConverter {
    upload_dir: PathBuf,
    output_dir: PathBuf,
    refiner: Option<Arc<dyn Refine>>,
    indexer: Option<Arc<dyn Index>>,
}

impl PdfConverter {
    /// Create a converter, ensuring both directories exist.
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> DocbayResult<Self> {
        let upload_dir = upload_dir.into();
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&upload_dir)?;
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self {
            upload_dir,
            output_dir,
            refiner: None,
            indexer: None,
        })
    }

    /// Attach a text refiner.
    pub fn with_refiner(mut self, refiner: Arc<dyn Refine>) -> Self {
        info!(model = refiner.model_name(), "AI refiner configured");
        self.refiner = Some(refiner);
        self
    }

    /// Attach an artifact indexer.
    pub fn with_indexer(mut self, indexer: Arc<dyn Index>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Whether a refiner is configured.
    pub fn has_refiner(&self) -> bool {
        self.refiner.is_some()
    }

    /// Directory holding produced artifacts.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist an uploaded PDF under a unique name and return its path.
    pub async fn save_upload(&self, filename: &str, bytes: Vec<u8>) -> DocbayResult<PathBuf> {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let unique_name = format!("{}_{}.pdf", stem, Uuid::new_v4());
        let path = self.upload_dir.join(unique_name);

        let size = bytes.len();
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), size, "saved uploaded PDF");

        Ok(path)
    }

    /// Convert the PDF at `pdf_path`, returning the produced artifacts.
    ///
    /// Extraction or document-build failure degrades into a placeholder
    /// error document with zero pages and empty text; only file I/O failure
    /// for the placeholder itself is an error.
    pub async fn convert(
        &self,
        pdf_path: &Path,
        extra_text: Option<&str>,
    ) -> DocbayResult<ConversionOutcome> {
        let stem = pdf_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| DocbayError::pdf("PDF path has no valid file stem"))?
            .to_string();

        let output_path = self.output_dir.join(format!("{}.docx", stem));
        let markdown_path = self.output_dir.join(format!("{}.md", stem));

        info!(
            source = %pdf_path.display(),
            output = %output_path.display(),
            "converting PDF to Word"
        );

        let pages = match self.extract_and_build(pdf_path, &output_path).await? {
            Ok(pages) => pages,
            Err(e) => {
                warn!(error = %e, "conversion failed, writing error document");
                return self.degraded_outcome(&output_path, e).await;
            }
        };

        let text_content = pages.full_text();
        let mut processed_text = String::new();
        let mut markdown = None;

        if let Some(ref refiner) = self.refiner {
            if !text_content.trim().is_empty() {
                processed_text = refiner.refine(&text_content, extra_text).await;
                tokio::fs::write(&markdown_path, &processed_text).await?;
                info!(path = %markdown_path.display(), "saved markdown artifact");

                if let Some(ref indexer) = self.indexer {
                    // Fire-and-forget; the outcome never depends on indexing
                    let _ = indexer.index_files(&[markdown_path.clone()]).await;
                }

                markdown = Some(markdown_path);
            } else {
                info!("extracted text is empty, skipping AI refinement");
            }
        }

        info!(pages = pages.page_count(), "conversion complete");

        Ok(ConversionOutcome {
            output_path,
            page_count: pages.page_count(),
            text_content,
            processed_text,
            markdown_path: markdown,
        })
    }

    /// Extract pages and write the paginated DOCX in one blocking task.
    ///
    /// The outer Result is fatal (task join); the inner one is the pipeline
    /// failure the caller degrades on.
    async fn extract_and_build(
        &self,
        pdf_path: &Path,
        output_path: &Path,
    ) -> DocbayResult<DocbayResult<PdfPages>> {
        let pdf_path = pdf_path.to_path_buf();
        let output_path = output_path.to_path_buf();

        let result = tokio::task::spawn_blocking(move || -> DocbayResult<PdfPages> {
            let pages = extract::extract_pages(&pdf_path)?;
            document::write_document(&output_path, &pages)?;
            Ok(pages)
        })
        .await?;

        Ok(result)
    }

    async fn degraded_outcome(
        &self,
        output_path: &Path,
        error: DocbayError,
    ) -> DocbayResult<ConversionOutcome> {
        let path = output_path.to_path_buf();
        let message = error.to_string();
        tokio::task::spawn_blocking(move || document::write_error_document(&path, &message))
            .await??;

        Ok(ConversionOutcome {
            output_path: output_path.to_path_buf(),
            page_count: 0,
            text_content: String::new(),
            processed_text: String::new(),
            markdown_path: None,
        })
    }
}
