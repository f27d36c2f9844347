//! Paginated DOCX emission using docx-rs.

use std::path::Path;

use docx_rs::{BreakType, Docx, Paragraph, Run};

use crate::error::{DocbayError, DocbayResult};
use crate::pipeline::extract::PdfPages;

/// Body font size in half-points (11 pt).
const BODY_SIZE: usize = 22;

/// Write a DOCX mirroring the source pagination: for every page a `Page {n}`
/// level-1 heading and one paragraph with that page's text, with an explicit
/// page break between pages (but not after the last).
pub fn write_document(path: &Path, pages: &PdfPages) -> DocbayResult<()> {
    let mut docx = Docx::new();
    let total = pages.page_count();

    for (i, text) in pages.pages().iter().enumerate() {
        docx = docx.add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(format!("Page {}", i + 1))),
        );

        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(text.as_str()).size(BODY_SIZE)),
        );

        if i + 1 < total {
            docx = docx
                .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
        }
    }

    pack(docx, path)
}

/// Write a minimal DOCX carrying a conversion error message.
///
/// Called when extraction or document building fails partway: the API layer
/// unconditionally checks file existence afterwards, so a file must exist even
/// on the failure path.
pub fn write_error_document(path: &Path, message: &str) -> DocbayResult<()> {
    let docx = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text("Conversion Error")),
        )
        .add_paragraph(Paragraph::new().add_run(
            Run::new().add_text(format!("An error occurred while converting the PDF: {}", message)),
        ));

    pack(docx, path)
}

fn pack(docx: Docx, path: &Path) -> DocbayResult<()> {
    let file = std::fs::File::create(path)?;
    docx.build()
        .pack(file)
        .map_err(|e| DocbayError::document(format!("Failed to write DOCX: {}", e)))?;
    Ok(())
}
