//! Per-page PDF text extraction.
//!
//! One extraction pass produces the page texts that feed both the full-text
//! accumulator and the output document builder.

use std::path::Path;

use crate::error::{DocbayError, DocbayResult};

/// Page texts extracted from one PDF, in page order.
#[derive(Debug, Clone)]
pub struct PdfPages {
    pages: Vec<String>,
}

impl PdfPages {
    /// Total number of pages in the source document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Per-page text, 0-indexed (page 1 is `pages()[0]`).
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Concatenated full text: one `--- Page {n} ---` labeled block per
    /// non-empty page, joined by blank lines.
    pub fn full_text(&self) -> String {
        let blocks: Vec<String> = self
            .pages
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| format!("--- Page {} ---\n{}", i + 1, text))
            .collect();

        blocks.join("\n\n")
    }
}

#[cfg(test)]
impl PdfPages {
    pub(crate) fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }
}

/// Extract text from every page of the PDF at `path`.
///
/// A page whose text cannot be decoded contributes an empty string; a PDF
/// that cannot be parsed at all is an error, which the orchestrator degrades
/// into a placeholder error document.
pub fn extract_pages(path: &Path) -> DocbayResult<PdfPages> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| DocbayError::pdf(format!("Failed to load PDF: {}", e)))?;

    let mut pages = Vec::new();
    for (page_num, _) in doc.get_pages() {
        let text = doc.extract_text(&[page_num]).unwrap_or_default();
        pages.push(text);
    }

    tracing::debug!(page_count = pages.len(), "extracted PDF text");

    Ok(PdfPages { pages })
}
