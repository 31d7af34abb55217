//! License certificate extraction.
//!
//! One pass per call: text layer, code search, expiration search, keyword
//! search, and, for FortiToken certificates without a text code, the OCR
//! fallback. Nothing is cached between calls.

pub mod ocr_fallback;

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::categorizer::{Keyword, KeywordCategorizer};
use crate::config::OcrConfig;
use crate::error::{self, ProcessError};
use crate::matcher::{CodeMatcher, ExpirationMatcher};
use crate::processor::{DocumentText, PdfTextExtractor};
use crate::sanitize::{hash_path, redact_path};
use crate::storage::{ProjectStorage, StoredFile};

pub use ocr_fallback::OcrFallback;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub code: Option<String>,
    pub expiration: Option<NaiveDate>,
    pub keyword: Option<Keyword>,
}

impl LicenseInfo {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.expiration.is_none() && self.keyword.is_none()
    }
}

pub struct LicenseExtractor {
    text_extractor: PdfTextExtractor,
    code_matcher: CodeMatcher,
    expiration_matcher: ExpirationMatcher,
    categorizer: KeywordCategorizer,
    ocr: Option<OcrFallback>,
}

impl LicenseExtractor {
    pub fn without_ocr() -> Self {
        Self {
            text_extractor: PdfTextExtractor::new(),
            code_matcher: CodeMatcher::new(),
            expiration_matcher: ExpirationMatcher::new(),
            categorizer: KeywordCategorizer::new(),
            ocr: None,
        }
    }

    pub fn with_ocr(ocr: OcrFallback) -> Self {
        Self {
            ocr: Some(ocr),
            ..Self::without_ocr()
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        if config.enabled {
            Self::with_ocr(OcrFallback::from_config(config))
        } else {
            Self::without_ocr()
        }
    }

    pub fn ocr_enabled(&self) -> bool {
        self.ocr.is_some()
    }

    /// Code, expiration and keyword from text alone. The three are independent.
    pub fn analyze_text(&self, text: &str) -> LicenseInfo {
        LicenseInfo {
            code: self.code_matcher.find_code(text),
            expiration: self.expiration_matcher.find_expiration(text),
            keyword: self.categorizer.categorize(text),
        }
    }

    /// Fails only when the file itself cannot be read.
    pub fn extract_license_info(&self, path: &Path) -> Result<LicenseInfo, ProcessError> {
        let _span = tracing::info_span!(
            "extractor.license",
            file = %redact_path(path),
            doc = %hash_path(path)
        )
        .entered();

        let document = self.text_extractor.extract(path)?;
        Ok(self.resolve(path, &document))
    }

    /// Every PDF of a project with its license details, in filename order.
    /// Files that vanish between listing and reading are left out.
    pub fn extract_project(
        &self,
        storage: &ProjectStorage,
        project: &str,
    ) -> error::Result<Vec<(StoredFile, LicenseInfo)>> {
        let files = storage.list_pdfs(project)?;

        let entries = files
            .into_iter()
            .filter_map(|file| match self.extract_license_info(&file.path) {
                Ok(info) => Some((file, info)),
                Err(e) => {
                    tracing::debug!(file = %file.filename, "Skipping unreadable file: {}", e);
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    fn resolve(&self, path: &Path, document: &DocumentText) -> LicenseInfo {
        let mut info = self.analyze_text(&document.full_text());

        let needs_ocr = info.code.is_none()
            && info
                .keyword
                .is_some_and(|keyword| keyword.requires_ocr_fallback());

        if needs_ocr {
            match &self.ocr {
                Some(ocr) => info.code = ocr.recover_code(path),
                None => tracing::debug!("OCR disabled, activation code stays absent"),
            }
        }

        tracing::debug!(
            pages = document.page_count(),
            code = info.code.is_some(),
            expiration = ?info.expiration,
            keyword = ?info.keyword,
            "License extracted"
        );

        info
    }
}
