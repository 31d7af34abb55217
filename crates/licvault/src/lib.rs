pub mod categorizer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod processor;
pub mod sanitize;
pub mod storage;

pub use categorizer::{Keyword, KeywordCategorizer};
pub use config::{load_config, Config};
pub use error::{ConfigError, LicvaultError, ProcessError, Result, StorageError};
pub use extractor::{LicenseExtractor, LicenseInfo, OcrFallback};
pub use processor::{DocumentText, PageRenderer, TextRecognizer};
pub use storage::{ProjectStorage, StoredFile};
