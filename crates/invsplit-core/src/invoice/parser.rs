//! Page parser combining the three field extractors.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::fields::{ExtractedFields, Field};

use super::rules::{
    normalize_date, ClientNameExtractor, FieldExtractor, InvoiceNumberExtractor,
    ScheduleDateExtractor,
};

/// Result of parsing one page.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted fields, placeholders for anything missing.
    pub fields: ExtractedFields,
    /// Strategy that produced each found field.
    pub strategies: BTreeMap<Field, &'static str>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
}

/// Trait for page parsing.
///
/// Implementations never fail: a field that cannot be found falls back to
/// its placeholder.
pub trait InvoiceParser {
    /// Parse the fields of one page.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Rule-based parser for invoice number, schedule date and client name.
pub struct FieldParser {
    invoice_number: InvoiceNumberExtractor,
    schedule_date: ScheduleDateExtractor,
    client_name: ClientNameExtractor,
}

impl FieldParser {
    /// Create a parser with default strategies.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            invoice_number: InvoiceNumberExtractor::new()
                .with_strategies(&config.invoice_strategies),
            schedule_date: ScheduleDateExtractor::new()
                .with_strategies(&config.schedule_strategies),
            client_name: ClientNameExtractor::from_config(config),
        }
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for FieldParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let mut strategies = BTreeMap::new();

        let invoice_number = self.invoice_number.extract(text).map(|m| {
            strategies.insert(Field::InvoiceNumber, m.strategy);
            m.value
        });

        let schedule_date = self
            .schedule_date
            .extract_all(text)
            .into_iter()
            .find_map(|m| normalize_date(&m.value).map(|date| (m.strategy, date)))
            .map(|(strategy, date)| {
                strategies.insert(Field::ScheduleDate, strategy);
                date
            });

        let client_name = self.client_name.extract(text).map(|m| {
            strategies.insert(Field::ClientName, m.strategy);
            m.value
        });

        let fields = ExtractedFields::from_options(invoice_number, schedule_date, client_name);
        let warnings: Vec<String> = fields
            .missing
            .iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        debug!(
            "Extracted {} / {} / {} ({} missing)",
            fields.invoice_number,
            fields.schedule_date,
            fields.client_name,
            fields.missing.len()
        );

        ExtractionResult {
            fields,
            strategies,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{InvoiceNumberStrategy, ScheduleStrategy};
    use crate::models::fields::{NO_DATE, UNKNOWN_CLIENT, UNKNOWN_INVOICE};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_page() {
        let text = r#"
            ACME SUPPLIES LTD
            INVOICE NO: IN3048
            Schedule: 02/12/2023
            ATTN: Jane Doe
            Total due: 1,200.00
        "#;

        let result = FieldParser::new().parse(text);

        assert_eq!(
            result.fields,
            ExtractedFields {
                invoice_number: "IN3048".to_string(),
                schedule_date: "02_12_2023".to_string(),
                client_name: "Jane Doe".to_string(),
                missing: vec![],
            }
        );
        assert!(result.warnings.is_empty());
        assert_eq!(result.strategies.get(&Field::ClientName), Some(&"attn"));
    }

    #[test]
    fn test_parse_nothing_found() {
        let result = FieldParser::new().parse("Thank you for your business.");

        assert_eq!(result.fields.invoice_number, UNKNOWN_INVOICE);
        assert_eq!(result.fields.schedule_date, NO_DATE);
        assert_eq!(result.fields.client_name, UNKNOWN_CLIENT);
        assert_eq!(result.warnings.len(), 3);
        assert!(result.strategies.is_empty());
    }

    #[test]
    fn test_parse_empty_text() {
        let result = FieldParser::new().parse("");
        assert_eq!(result.fields, ExtractedFields::unknown());
    }

    #[test]
    fn test_separator_only_date_is_missing() {
        let result = FieldParser::new().parse("Schedule: //\nINVOICE NO: 7");

        assert_eq!(result.fields.schedule_date, NO_DATE);
        assert_eq!(result.fields.missing, vec![Field::ScheduleDate, Field::ClientName]);
    }

    #[test]
    fn test_inline_invoice_strategy_can_be_disabled() {
        let text = "INVOICE 2023 SERIES\nSchedule: 01/01/2024\nATTN: X";

        let default = FieldParser::new().parse(text);
        assert_eq!(default.fields.invoice_number, "2023");
        assert_eq!(default.strategies.get(&Field::InvoiceNumber), Some(&"inline"));

        let config = ExtractionConfig {
            invoice_strategies: vec![InvoiceNumberStrategy::Labeled],
            ..ExtractionConfig::default()
        };
        let labeled_only = FieldParser::from_config(&config).parse(text);

        assert_eq!(labeled_only.fields.invoice_number, UNKNOWN_INVOICE);
        assert_eq!(labeled_only.fields.schedule_date, "01_01_2024");
        assert_eq!(labeled_only.fields.missing, vec![Field::InvoiceNumber]);
    }

    #[test]
    fn test_schedule_strategies_follow_config() {
        let text = "Schedule:\n05/06/2024";
        let config = ExtractionConfig {
            schedule_strategies: vec![ScheduleStrategy::SameLine],
            ..ExtractionConfig::default()
        };

        assert_eq!(FieldParser::new().parse(text).fields.schedule_date, "05_06_2024");
        assert_eq!(FieldParser::from_config(&config).parse(text).fields.schedule_date, NO_DATE);
    }

    #[test]
    fn test_fields_are_independent_of_order() {
        let a = FieldParser::new().parse("ATTN: Bob\nSchedule: 1/2/2024\nINVOICE NO: X1");
        let b = FieldParser::new().parse("INVOICE NO: X1\nATTN: Bob\nSchedule: 1/2/2024");

        assert_eq!(a.fields, b.fields);
    }
}
