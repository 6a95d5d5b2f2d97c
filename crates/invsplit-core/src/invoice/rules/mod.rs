//! Rule-based field extractors for invoice pages.
//!
//! Each field is resolved by an ordered list of named strategies. An
//! extractor reports candidates in priority order (strategy order first,
//! then position in the text), so the first candidate is the winner.

pub mod client;
pub mod invoice_number;
pub mod patterns;
pub mod schedule;

pub use client::{extract_client_name, ClientNameExtractor};
pub use invoice_number::{extract_invoice_number, InvoiceNumberExtractor, InvoiceNumberStrategy};
pub use patterns::*;
pub use schedule::{extract_schedule_date, normalize_date, ScheduleDateExtractor, ScheduleStrategy};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidates for the field, best first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A candidate value together with the strategy that produced it.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the strategy that matched.
    pub strategy: &'static str,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, strategy: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            strategy,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Trimmed, non-empty lines of a page with their byte offsets.
pub(crate) fn non_empty_lines(text: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in text.split('\n') {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let lead = raw.len() - raw.trim_start().len();
            lines.push((offset + lead, trimmed));
        }
        offset += raw.len() + 1;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_lines_offsets() {
        let text = "  INVOICE\n\n  ACME LTD \r\n";
        let lines = non_empty_lines(text);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (2, "INVOICE"));
        assert_eq!(lines[1].1, "ACME LTD");
        assert_eq!(&text[lines[1].0..lines[1].0 + 8], "ACME LTD");
    }
}
