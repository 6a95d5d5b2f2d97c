//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, FieldParser, InvoiceParser};
