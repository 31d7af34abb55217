use std::path::Path;

use crate::error::ProcessError;
use crate::processor::DocumentText;
use crate::sanitize::redact_path;

/// Reads the embedded text layer of a PDF with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Only a failure to read the file is an error. Bytes that lopdf cannot
    /// parse yield an empty document.
    pub fn extract(&self, path: &Path) -> Result<DocumentText, ProcessError> {
        let _span = tracing::info_span!("processor.pdf", file = %redact_path(path)).entered();

        let pdf_bytes = std::fs::read(path).map_err(|e| ProcessError::ReadDocument {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(extract_text_from_bytes(&pdf_bytes))
    }
}

pub fn extract_text_from_bytes(pdf_bytes: &[u8]) -> DocumentText {
    match lopdf::Document::load_mem(pdf_bytes) {
        Ok(doc) => extract_text_from_pdf(&doc),
        Err(e) => {
            tracing::warn!("lopdf failed to parse document: {}. Treating as empty.", e);
            DocumentText::empty()
        }
    }
}

fn extract_text_from_pdf(doc: &lopdf::Document) -> DocumentText {
    let pages = doc
        .get_pages()
        .into_keys()
        .map(|page_num| match doc.extract_text(&[page_num]) {
            Ok(page_text) => page_text,
            Err(e) => {
                tracing::debug!(page = page_num, "No text extracted from page: {}", e);
                String::new()
            }
        })
        .collect();

    DocumentText::new(pages)
}
