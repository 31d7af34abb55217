use std::io::{self, Cursor};
use std::process::Command;
use std::sync::Arc;
use std::time::Instant;

use crate::config::OcrConfig;
use crate::error::ProcessError;
use crate::processor::command::output_with_deadline;
use crate::processor::TextRecognizer;

fn language_string(languages: &[String]) -> String {
    if languages.is_empty() {
        "eng".to_string()
    } else {
        languages.join("+")
    }
}

/// Decodes any supported raster format and re-encodes it as PNG.
fn normalize_to_png(image_data: &[u8]) -> Result<Vec<u8>, ProcessError> {
    let img = image::load_from_memory(image_data)
        .map_err(|e| ProcessError::OcrFailed(format!("Failed to load image: {}", e)))?;

    let mut png_data = Vec::new();
    let mut cursor = Cursor::new(&mut png_data);
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| ProcessError::OcrFailed(format!("Failed to convert image: {}", e)))?;

    Ok(png_data)
}

/// Runs the `tesseract` command line tool on each image.
#[derive(Clone)]
pub struct TesseractRecognizer {
    inner: Arc<TesseractRecognizerInner>,
}

struct TesseractRecognizerInner {
    languages: String,
}

impl TesseractRecognizer {
    pub fn new(languages: &[String]) -> Self {
        Self {
            inner: Arc::new(TesseractRecognizerInner {
                languages: language_string(languages),
            }),
        }
    }

    pub fn languages(&self) -> &str {
        &self.inner.languages
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image_data: &[u8], deadline: Instant) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("processor.ocr").entered();

        let png_data = normalize_to_png(image_data)?;

        let image_path =
            std::env::temp_dir().join(format!("licvault_ocr_{}.png", uuid::Uuid::new_v4()));
        std::fs::write(&image_path, &png_data)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to write temp image: {}", e)))?;

        let mut command = Command::new("tesseract");
        command
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", &self.inner.languages]);
        let output = output_with_deadline(&mut command, deadline);

        let _ = std::fs::remove_file(&image_path);

        let output = output.map_err(|e| match e.kind() {
            io::ErrorKind::TimedOut => {
                ProcessError::OcrFailed("tesseract exceeded the OCR time budget".to_string())
            }
            _ => ProcessError::OcrFailed(format!(
                "Failed to run tesseract: {}. Make sure tesseract-ocr is installed.",
                e
            )),
        })?;

        if !output.status.success() {
            return Err(ProcessError::OcrFailed(format!(
                "tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// In-process Tesseract through leptess.
#[cfg(feature = "leptess")]
#[derive(Clone)]
pub struct LeptessRecognizer {
    languages: Arc<str>,
}

#[cfg(feature = "leptess")]
impl LeptessRecognizer {
    pub fn new(languages: &[String]) -> Self {
        Self {
            languages: language_string(languages).into(),
        }
    }
}

/// Recognition runs in-process and cannot be interrupted, so the deadline
/// is only checked before it starts.
#[cfg(feature = "leptess")]
impl TextRecognizer for LeptessRecognizer {
    fn recognize(&self, image_data: &[u8], deadline: Instant) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("processor.ocr").entered();

        if Instant::now() >= deadline {
            return Err(ProcessError::OcrFailed(
                "OCR time budget exhausted before recognition".to_string(),
            ));
        }

        let png_data = normalize_to_png(image_data)?;

        let mut lt = leptess::LepTess::new(None, &self.languages).map_err(|e| {
            ProcessError::OcrFailed(format!("Failed to initialize Tesseract: {}", e))
        })?;

        lt.set_image_from_mem(&png_data)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to set image for OCR: {}", e)))?;

        lt.get_utf8_text()
            .map_err(|e| ProcessError::OcrFailed(format!("OCR failed: {}", e)))
    }
}

/// Picks the recognizer compiled into this build.
pub fn default_recognizer(config: &OcrConfig) -> Box<dyn TextRecognizer> {
    #[cfg(feature = "leptess")]
    {
        Box::new(LeptessRecognizer::new(&config.languages))
    }
    #[cfg(not(feature = "leptess"))]
    {
        Box::new(TesseractRecognizer::new(&config.languages))
    }
}
