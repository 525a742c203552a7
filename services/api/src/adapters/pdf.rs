//! services/api/src/adapters/pdf.rs
//!
//! This module contains the adapter for PDF text extraction.
//! It implements the `PdfTextService` port from the `core` crate.

use async_trait::async_trait;
use study_core::ports::{PdfTextService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `PdfTextService` using the `pdf-extract` crate.
#[derive(Clone, Default)]
pub struct PdfExtractAdapter;

impl PdfExtractAdapter {
    /// Creates a new `PdfExtractAdapter`.
    pub fn new() -> Self {
        Self
    }
}

//=========================================================================================
// `PdfTextService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PdfTextService for PdfExtractAdapter {
    /// Extracts the plain text of a PDF document.
    ///
    /// `pdf-extract` is synchronous CPU work, so it runs on the blocking
    /// thread pool rather than stalling the request executor.
    async fn extract_text(&self, pdf_bytes: &[u8]) -> PortResult<String> {
        let bytes = pdf_bytes.to_vec();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .map_err(|e| PortError::Unexpected(format!("Failed to extract PDF text: {}", e)))?;
        Ok(text)
    }
}
