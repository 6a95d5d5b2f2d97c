//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A page of the source document and its extracted text.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page, empty if extraction failed.
    pub text: String,
}

impl PdfPage {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page.
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract the text of every page, in page order.
    ///
    /// Pages whose text cannot be extracted come back empty.
    fn extract_pages(&self) -> Vec<PdfPage> {
        (1..=self.page_count())
            .map(|number| PdfPage::new(number, self.extract_page_text(number).unwrap_or_default()))
            .collect()
    }

    /// Write a page out as a standalone single-page PDF.
    fn split_page(&self, page: u32) -> Result<Vec<u8>>;
}
