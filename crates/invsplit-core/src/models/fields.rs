//! Fields extracted from a single invoice page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder used when no invoice number is found.
pub const UNKNOWN_INVOICE: &str = "UnknownInvoice";

/// Placeholder used when no schedule date is found.
pub const NO_DATE: &str = "NoDate";

/// Placeholder used when no client name is found.
pub const UNKNOWN_CLIENT: &str = "UnknownClient";

/// One of the three fields that make up an output filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InvoiceNumber,
    ScheduleDate,
    ClientName,
}

impl Field {
    /// All fields in filename order.
    pub const ALL: [Field; 3] = [Field::InvoiceNumber, Field::ScheduleDate, Field::ClientName];

    /// Fallback value substituted when the field is missing.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::InvoiceNumber => UNKNOWN_INVOICE,
            Self::ScheduleDate => NO_DATE,
            Self::ClientName => UNKNOWN_CLIENT,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvoiceNumber => "invoice number",
            Self::ScheduleDate => "schedule date",
            Self::ClientName => "client name",
        };
        f.write_str(name)
    }
}

/// Invoice number, schedule date and client name of one page.
///
/// Missing values hold their placeholder and are listed in `missing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub invoice_number: String,
    pub schedule_date: String,
    pub client_name: String,
    /// Fields that fell back to a placeholder.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<Field>,
}

impl ExtractedFields {
    /// Build from optional values, substituting placeholders for `None`.
    pub fn from_options(
        invoice_number: Option<String>,
        schedule_date: Option<String>,
        client_name: Option<String>,
    ) -> Self {
        let mut missing = Vec::new();
        let mut resolve = |field: Field, value: Option<String>| {
            value.unwrap_or_else(|| {
                missing.push(field);
                field.placeholder().to_string()
            })
        };

        let invoice_number = resolve(Field::InvoiceNumber, invoice_number);
        let schedule_date = resolve(Field::ScheduleDate, schedule_date);
        let client_name = resolve(Field::ClientName, client_name);

        Self {
            invoice_number,
            schedule_date,
            client_name,
            missing,
        }
    }

    /// Every field is a placeholder.
    pub fn unknown() -> Self {
        Self::from_options(None, None, None)
    }

    /// Value of a single field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::InvoiceNumber => &self.invoice_number,
            Field::ScheduleDate => &self.schedule_date,
            Field::ClientName => &self.client_name,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_options_tracks_missing() {
        let fields = ExtractedFields::from_options(Some("IN3048".to_string()), None, None);

        assert_eq!(fields.invoice_number, "IN3048");
        assert_eq!(fields.schedule_date, NO_DATE);
        assert_eq!(fields.client_name, UNKNOWN_CLIENT);
        assert_eq!(fields.missing, vec![Field::ScheduleDate, Field::ClientName]);
        assert!(!fields.is_complete());
    }

    #[test]
    fn test_unknown_uses_all_placeholders() {
        let fields = ExtractedFields::unknown();

        for field in Field::ALL {
            assert_eq!(fields.get(field), field.placeholder());
        }
        assert_eq!(fields.missing.len(), 3);
    }
}
