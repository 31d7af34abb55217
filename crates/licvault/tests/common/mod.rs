//! Shared test utilities for licvault integration tests.
//!
//! This module provides:
//! - `PdfBuilder` for text-layer PDFs built with lopdf
//! - Fake page renderer and text recognizer for the OCR fallback
//! - `TestHarness` with an isolated license root

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
