//! Output naming, sanitization and archive packaging.

pub mod archive;
pub mod sanitize;

pub use archive::ArchiveBuilder;
pub use sanitize::Sanitizer;

use crate::models::fields::ExtractedFields;

/// A single-page PDF and the name it is stored under.
#[derive(Debug, Clone)]
pub struct OutputEntry {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Compose `{invoice_number}_{schedule_date}_{client_name}.pdf`.
///
/// Fields are expected to be sanitized already. Underscores inside a field
/// are indistinguishable from the separators.
pub fn compose_filename(fields: &ExtractedFields) -> String {
    format!(
        "{}_{}_{}.pdf",
        fields.invoice_number, fields.schedule_date, fields.client_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_filename() {
        let fields = ExtractedFields::from_options(
            Some("IN3048".to_string()),
            Some("02_12_2023".to_string()),
            Some("Jane_Doe".to_string()),
        );

        assert_eq!(compose_filename(&fields), "IN3048_02_12_2023_Jane_Doe.pdf");
    }

    #[test]
    fn test_compose_placeholders() {
        assert_eq!(
            compose_filename(&ExtractedFields::unknown()),
            "UnknownInvoice_NoDate_UnknownClient.pdf"
        );
    }
}
