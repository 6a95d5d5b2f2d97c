//! Error types for the invsplit-core library.

use thiserror::Error;

/// Main error type for the invsplit library.
#[derive(Error, Debug)]
pub enum SplitError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Archive packaging error.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// No page made it into the archive.
    #[error("no pages were processed ({skipped} of {total} skipped)")]
    NothingProcessed { total: u32, skipped: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to write a single-page document.
    #[error("failed to split page {page}: {reason}")]
    Split { page: u32, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Result type for the invsplit library.
pub type Result<T> = std::result::Result<T, SplitError>;
