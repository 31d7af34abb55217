mod command;
pub mod ocr;
pub mod pdf;
pub mod render;

use std::path::Path;
use std::time::Instant;

use crate::error::ProcessError;

pub use ocr::TesseractRecognizer;
#[cfg(feature = "leptess")]
pub use ocr::LeptessRecognizer;
pub use pdf::PdfTextExtractor;
pub use render::PdftoppmRenderer;

/// Text layer of a PDF, one entry per page in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    pages: Vec<String>,
}

impl DocumentText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined by a newline.
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

/// Rasterizes every page of a PDF, in page order.
///
/// Work still running at `deadline` is abandoned with an error.
pub trait PageRenderer: Send + Sync {
    fn render_pages(&self, path: &Path, deadline: Instant) -> Result<Vec<Vec<u8>>, ProcessError>;
}

/// Recognizes the text in one encoded raster image, giving up at `deadline`.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image_data: &[u8], deadline: Instant) -> Result<String, ProcessError>;
}
