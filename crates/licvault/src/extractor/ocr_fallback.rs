use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::OcrConfig;
use crate::matcher::ActivationTokenMatcher;
use crate::processor::ocr::default_recognizer;
use crate::processor::{PageRenderer, PdftoppmRenderer, TextRecognizer};

const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(120);
const MAX_TIME_BUDGET: Duration = Duration::from_secs(24 * 60 * 60);

/// Recovers an activation code that only exists as an image on the page.
pub struct OcrFallback {
    renderer: Box<dyn PageRenderer>,
    recognizer: Box<dyn TextRecognizer>,
    matcher: ActivationTokenMatcher,
    time_budget: Duration,
}

impl OcrFallback {
    pub fn new(renderer: Box<dyn PageRenderer>, recognizer: Box<dyn TextRecognizer>) -> Self {
        Self {
            renderer,
            recognizer,
            matcher: ActivationTokenMatcher::new(),
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(
            Box::new(PdftoppmRenderer::new(config.dpi, config.max_pages)),
            default_recognizer(config),
        )
        .with_time_budget(Duration::from_secs(config.timeout_secs))
    }

    /// Upper bound on rendering plus recognition for one document. Tools
    /// still running when it runs out are killed. Capped at one day.
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget.min(MAX_TIME_BUDGET);
        self
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// First activation code found, scanning pages in order. Rendering and
    /// recognition failures are logged and end up as `None`.
    pub fn recover_code(&self, path: &Path) -> Option<String> {
        let _span = tracing::info_span!("processor.ocr_fallback").entered();
        let started = Instant::now();
        let deadline = started + self.time_budget;

        let pages = match self.renderer.render_pages(path, deadline) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!("Page rendering failed, skipping OCR: {}", e);
                return None;
            }
        };

        for (index, image) in pages.iter().enumerate() {
            let page = index + 1;

            if Instant::now() >= deadline {
                tracing::warn!(
                    page,
                    total = pages.len(),
                    "OCR time budget of {:?} exhausted",
                    self.time_budget
                );
                return None;
            }

            match self.recognizer.recognize(image, deadline) {
                Ok(text) => {
                    if let Some(code) = self.matcher.find_token(&text) {
                        tracing::info!(page, "Recovered activation code with OCR");
                        return Some(code);
                    }
                }
                Err(e) => {
                    tracing::warn!(page, "OCR failed on page: {}", e);
                }
            }
        }

        tracing::debug!(pages = pages.len(), "No activation code found with OCR");
        None
    }
}
