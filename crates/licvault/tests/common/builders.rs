//! Builders for test documents and OCR fakes.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use lopdf::{dictionary, Document, Object, Stream};

use licvault::{PageRenderer, ProcessError, TextRecognizer};

/// Builds a PDF whose pages carry the given text lines.
pub struct PdfBuilder {
    pages: Vec<Vec<String>>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Adds a page; each line becomes its own text object.
    pub fn page(mut self, lines: &[&str]) -> Self {
        self.pages.push(lines.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Adds a page with no content stream, like a scan without a text layer.
    pub fn blank_page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids = Vec::new();
        for lines in &self.pages {
            let content: String = lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    format!(
                        "BT /F1 12 Tf 50 {} Td ({}) Tj ET\n",
                        740 - (i as i64) * 16,
                        escape_pdf_string(line)
                    )
                })
                .collect();
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => resources_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut pdf_bytes = Vec::new();
        doc.save_to(&mut pdf_bytes).expect("Failed to serialize PDF");
        pdf_bytes
    }

    pub fn write_to(&self, dir: &Path, filename: &str) -> PathBuf {
        let path = dir.join(filename);
        std::fs::write(&path, self.build()).expect("Failed to write PDF");
        path
    }
}

fn escape_pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Renderer that returns fixed "images"; each image is the text the
/// paired `EchoRecognizer` will report for that page.
pub struct FakeRenderer {
    pages: Option<Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl FakeRenderer {
    pub fn with_pages(pages: &[&str]) -> Self {
        Self {
            pages: Some(pages.iter().map(|p| p.to_string()).collect()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            pages: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl PageRenderer for FakeRenderer {
    fn render_pages(&self, _path: &Path, _deadline: Instant) -> Result<Vec<Vec<u8>>, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .as_ref()
            .map(|pages| pages.iter().map(|p| p.as_bytes().to_vec()).collect())
            .ok_or_else(|| ProcessError::PdfRendering("renderer unavailable".to_string()))
    }
}

/// Recognizes an image as its own bytes. The image `FAIL` is an OCR error.
pub struct EchoRecognizer;

impl TextRecognizer for EchoRecognizer {
    fn recognize(&self, image_data: &[u8], _deadline: Instant) -> Result<String, ProcessError> {
        if image_data == b"FAIL" {
            return Err(ProcessError::OcrFailed("unreadable page".to_string()));
        }
        Ok(String::from_utf8_lossy(image_data).into_owned())
    }
}
