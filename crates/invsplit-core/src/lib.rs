//! Core library for splitting multi-invoice PDFs.
//!
//! This crate provides:
//! - PDF processing (per-page text extraction and single-page splitting)
//! - Invoice field extraction (invoice number, schedule date, client name)
//! - Filename sanitization and naming
//! - Zip packaging of the renamed pages

pub mod error;
pub mod invoice;
pub mod models;
pub mod output;
pub mod pdf;
pub mod pipeline;

pub use error::{PdfError, Result, SplitError};
pub use invoice::{ExtractionResult, FieldParser, InvoiceParser};
pub use models::config::SplitterConfig;
pub use models::fields::{ExtractedFields, Field};
pub use models::report::{PageReport, PageStatus, SplitReport};
pub use output::{compose_filename, ArchiveBuilder, OutputEntry, Sanitizer};
pub use pdf::{PdfExtractor, PdfPage, PdfProcessor};
pub use pipeline::{
    describe_text, inspect_document, inspect_with, split_document, split_with, SplitOutcome,
};
