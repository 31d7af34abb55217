//! Test harness for isolated test execution.
//!
//! `TestHarness` owns a temporary license root and wires a
//! `LicenseExtractor` with either no OCR or a fake OCR backend.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::TempDir;

use licvault::{LicenseExtractor, LicenseInfo, OcrFallback, ProjectStorage};

use super::builders::{EchoRecognizer, FakeRenderer, PdfBuilder};

pub struct TestHarness {
    temp_dir: TempDir,
    /// Root directory holding one directory per project.
    pub license_root: PathBuf,
    extractor: LicenseExtractor,
    render_calls: Option<Arc<AtomicUsize>>,
}

impl TestHarness {
    /// Harness with OCR disabled.
    pub fn new() -> Self {
        Self::build(LicenseExtractor::without_ocr(), None)
    }

    /// Harness whose OCR fallback "sees" the given text on each page.
    pub fn with_ocr_pages(pages: &[&str]) -> Self {
        Self::with_renderer(FakeRenderer::with_pages(pages))
    }

    pub fn with_renderer(renderer: FakeRenderer) -> Self {
        let calls = renderer.call_counter();
        let ocr = OcrFallback::new(Box::new(renderer), Box::new(EchoRecognizer));
        Self::build(LicenseExtractor::with_ocr(ocr), Some(calls))
    }

    fn build(extractor: LicenseExtractor, render_calls: Option<Arc<AtomicUsize>>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let license_root = temp_dir.path().join("licenses");
        std::fs::create_dir_all(&license_root).expect("Failed to create license root");

        Self {
            temp_dir,
            license_root,
            extractor,
            render_calls,
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn storage(&self) -> ProjectStorage {
        ProjectStorage::new(&self.license_root)
    }

    pub fn extractor(&self) -> &LicenseExtractor {
        &self.extractor
    }

    /// Stores a built PDF under `project` and returns its path.
    pub fn store_pdf(&self, project: &str, filename: &str, pdf: &PdfBuilder) -> PathBuf {
        self.storage()
            .save(project, filename, &pdf.build())
            .expect("Failed to store PDF")
    }

    /// Stores raw bytes, bypassing the builder.
    pub fn store_bytes(&self, project: &str, filename: &str, content: &[u8]) -> PathBuf {
        self.storage()
            .save(project, filename, content)
            .expect("Failed to store file")
    }

    pub fn extract(&self, path: &Path) -> LicenseInfo {
        self.extractor
            .extract_license_info(path)
            .expect("Extraction failed")
    }

    /// How many times the OCR fallback rendered pages.
    pub fn render_calls(&self) -> usize {
        self.render_calls
            .as_ref()
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}
