//! Response types for the licvault API

use chrono::{DateTime, Utc};
use licvault::{LicenseInfo, StoredFile};
use serde::{Deserialize, Serialize};

/// A stored PDF together with what was extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseEntry {
    pub filename: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
    pub info: LicenseInfo,
}

impl LicenseEntry {
    pub fn new(file: StoredFile, info: LicenseInfo) -> Self {
        Self {
            filename: file.filename,
            size_bytes: file.size_bytes,
            modified: file.modified,
            info,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub uploaded: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenProjectQuery {
    pub project: String,
}
