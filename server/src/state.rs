//! Shared application state

use anyhow::{Context, Result};
use licvault::{Config, LicenseExtractor, ProjectStorage};

use crate::views::Templates;

pub struct AppState {
    pub storage: ProjectStorage,
    pub extractor: LicenseExtractor,
    pub templates: Templates,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_extractor(config, LicenseExtractor::from_config(&config.ocr))
    }

    /// State with a caller-supplied extractor, e.g. one wired to a fake OCR backend.
    pub fn with_extractor(config: &Config, extractor: LicenseExtractor) -> Result<Self> {
        std::fs::create_dir_all(&config.license_root)
            .with_context(|| format!("Failed to create license root {}", config.license_root))?;

        tracing::info!(
            root = %config.license_root,
            ocr = extractor.ocr_enabled(),
            "License store ready"
        );

        Ok(Self {
            storage: ProjectStorage::new(&config.license_root),
            extractor,
            templates: Templates::new()?,
        })
    }
}
