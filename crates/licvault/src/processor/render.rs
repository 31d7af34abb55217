use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use crate::error::ProcessError;
use crate::processor::command::output_with_deadline;
use crate::processor::PageRenderer;

/// Renders PDF pages to PNG with poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    dpi: u32,
    max_pages: u32,
}

impl PdftoppmRenderer {
    pub fn new(dpi: u32, max_pages: u32) -> Self {
        Self { dpi, max_pages }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    fn render_into(
        &self,
        pdf_path: &Path,
        work_dir: &Path,
        deadline: Instant,
    ) -> Result<Vec<Vec<u8>>, ProcessError> {
        let output_prefix = work_dir.join("page");

        let mut command = Command::new("pdftoppm");
        command
            .arg("-png")
            .args(["-r", &self.dpi.to_string()])
            .args(["-f", "1", "-l", &self.max_pages.to_string()])
            .arg(pdf_path)
            .arg(&output_prefix);

        let output = output_with_deadline(&mut command, deadline).map_err(|e| match e.kind() {
            io::ErrorKind::TimedOut => {
                ProcessError::PdfRendering("pdftoppm exceeded the OCR time budget".to_string())
            }
            _ => ProcessError::PdfRendering(format!(
                "Failed to run pdftoppm: {}. Make sure poppler-utils is installed.",
                e
            )),
        })?;

        if !output.status.success() {
            return Err(ProcessError::PdfRendering(format!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let entries = std::fs::read_dir(work_dir).map_err(|e| {
            ProcessError::PdfRendering(format!("Failed to list rendered pages: {}", e))
        })?;

        // pdftoppm names pages prefix-N.png, zero padded to the page count width
        let mut rendered: Vec<(u32, PathBuf)> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter_map(|path| page_number(&path).map(|n| (n, path)))
            .collect();
        rendered.sort_by_key(|(n, _)| *n);

        if rendered.is_empty() {
            return Err(ProcessError::PdfRendering(
                "pdftoppm produced no page images".to_string(),
            ));
        }

        rendered
            .iter()
            .map(|(_, path)| {
                std::fs::read(path).map_err(|e| {
                    ProcessError::PdfRendering(format!("Failed to read rendered image: {}", e))
                })
            })
            .collect()
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render_pages(&self, path: &Path, deadline: Instant) -> Result<Vec<Vec<u8>>, ProcessError> {
        let _span = tracing::info_span!("processor.render", dpi = self.dpi).entered();

        let work_dir = std::env::temp_dir().join(format!("licvault_render_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&work_dir).map_err(|e| {
            ProcessError::PdfRendering(format!("Failed to create render directory: {}", e))
        })?;

        let result = self.render_into(path, &work_dir, deadline);

        let _ = std::fs::remove_dir_all(&work_dir);

        result
    }
}

fn page_number(path: &Path) -> Option<u32> {
    if path.extension().and_then(|e| e.to_str()) != Some("png") {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.strip_prefix("page-"))
        .and_then(|n| n.parse().ok())
}
