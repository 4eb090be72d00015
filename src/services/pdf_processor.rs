use std::time::Instant;

use lopdf::Document;
use pdf_extract::extract_text_from_mem;

use crate::error::{AppError, AppResult};
use crate::models::ExtractedText;

/// Turns uploaded PDF bytes into plain text.
///
/// Only single-page documents are accepted. The page count is checked
/// before any text is pulled out of the content streams; a document with
/// no pages at all is treated as broken rather than empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfProcessor;

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, content: &[u8]) -> AppResult<ExtractedText> {
        let start = Instant::now();

        tracing::debug!("Starting PDF text extraction ({} bytes)", content.len());

        let pages = self.page_count(content)?;
        if pages == 0 {
            tracing::warn!("Rejecting PDF with an empty page tree");
            return Err(AppError::internal("PDF has no pages"));
        }
        if pages > 1 {
            tracing::warn!(pages = pages, "Rejecting multi-page PDF");
            return Err(AppError::UnsupportedDocument);
        }

        let text = extract_text_from_mem(content).map_err(|e| {
            tracing::warn!("PDF text extraction failed: {}", e);
            AppError::internal(format!("Failed to extract text from PDF: {}", e))
        })?;

        let extracted = ExtractedText::new(text).ok_or_else(|| {
            tracing::warn!("No text extracted from PDF");
            AppError::EmptyContent
        })?;

        tracing::info!(
            "PDF processing completed in {}ms, extracted {} characters",
            start.elapsed().as_millis(),
            extracted.as_str().len()
        );

        Ok(extracted)
    }

    pub fn page_count(&self, content: &[u8]) -> AppResult<usize> {
        let doc = Document::load_mem(content).map_err(|e| {
            tracing::warn!("PDF structure validation failed: {}", e);
            AppError::internal(format!("Failed to parse PDF: {}", e))
        })?;
        Ok(doc.get_pages().len())
    }
}
