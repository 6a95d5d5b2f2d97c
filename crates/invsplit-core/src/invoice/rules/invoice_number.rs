//! Invoice number extraction.

use super::patterns::{INVOICE_INLINE, INVOICE_NO_LABEL};
use super::{ExtractionMatch, FieldExtractor};

pub use crate::models::config::InvoiceNumberStrategy;

impl InvoiceNumberStrategy {
    fn apply(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        let pattern = match self {
            Self::Labeled => &*INVOICE_NO_LABEL,
            Self::Inline => &*INVOICE_INLINE,
        };

        pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let number = caps.get(1)?;
                let full_match = caps.get(0)?;
                Some(
                    ExtractionMatch::new(number.as_str().to_string(), self.name(), full_match.as_str())
                        .with_position(number.start(), number.end()),
                )
            })
            .collect()
    }
}

/// Invoice number field extractor.
pub struct InvoiceNumberExtractor {
    strategies: Vec<InvoiceNumberStrategy>,
}

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self {
            strategies: InvoiceNumberStrategy::DEFAULT_ORDER.to_vec(),
        }
    }

    /// Restrict or reorder the strategies.
    pub fn with_strategies(mut self, strategies: &[InvoiceNumberStrategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.apply(text).into_iter().next())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();
        for strategy in &self.strategies {
            for candidate in strategy.apply(text) {
                // The inline pattern re-finds labeled numbers; keep the first.
                if results.iter().any(|r| r.position == candidate.position) {
                    continue;
                }
                results.push(candidate);
            }
        }
        results
    }
}

/// Extract the invoice number using the default strategies.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_number() {
        let text = "ACME SUPPLIES\nINVOICE NO: IN3048\nSchedule: 02/12/2023";
        let result = InvoiceNumberExtractor::new().extract(text).unwrap();

        assert_eq!(result.value, "IN3048");
        assert_eq!(result.strategy, "labeled");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_invoice_number("Invoice No. in3048"), Some("in3048".to_string()));
    }

    #[test]
    fn test_stops_at_non_alphanumeric() {
        assert_eq!(extract_invoice_number("INVOICE NO: IN-3048"), Some("IN".to_string()));
    }

    #[test]
    fn test_inline_fallback() {
        let result = InvoiceNumberExtractor::new()
            .extract("Invoice # 1042\nDate: today")
            .unwrap();

        assert_eq!(result.value, "1042");
        assert_eq!(result.strategy, "inline");
    }

    #[test]
    fn test_labeled_wins_over_earlier_inline() {
        let text = "INVOICE 2023 SERIES\nINVOICE NO: IN77";
        assert_eq!(extract_invoice_number(text), Some("IN77".to_string()));
    }

    #[test]
    fn test_labeled_only() {
        let extractor = InvoiceNumberExtractor::new().with_strategies(&[InvoiceNumberStrategy::Labeled]);
        assert!(extractor.extract("Invoice # 1042").is_none());
    }

    #[test]
    fn test_missing() {
        assert_eq!(extract_invoice_number("Statement of account\nTotal 100.00"), None);
        assert_eq!(extract_invoice_number(""), None);
    }

    #[test]
    fn test_extract_all_deduplicates() {
        let text = "INVOICE NO: IN1\nINVOICE NO: IN2";
        let values: Vec<String> = InvoiceNumberExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();

        assert_eq!(values, vec!["IN1", "IN2"]);
    }
}
