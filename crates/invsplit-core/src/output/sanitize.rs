//! Filename sanitization for extracted fields.

use crate::models::config::{NamingConfig, SpacePolicy};
use crate::models::fields::{ExtractedFields, Field};

/// Maps raw field values to tokens safe for a path component.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    spaces: SpacePolicy,
    allowed_symbols: Vec<char>,
}

impl Sanitizer {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            spaces: config.spaces,
            allowed_symbols: config.allowed_symbols.chars().collect(),
        }
    }

    fn is_allowed(&self, c: char) -> bool {
        c.is_alphanumeric() || self.allowed_symbols.contains(&c)
    }

    /// Sanitize one value. May return an empty string.
    pub fn sanitize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut pending_space = false;

        for c in raw.chars() {
            if c.is_whitespace() {
                pending_space = true;
                continue;
            }
            if !self.is_allowed(c) {
                continue;
            }
            if pending_space {
                if self.spaces == SpacePolicy::Underscore && !out.is_empty() {
                    out.push('_');
                }
                pending_space = false;
            }
            out.push(c);
        }

        out
    }

    /// Sanitize all three fields.
    ///
    /// A found value that sanitizes to nothing counts as missing.
    pub fn sanitize_fields(&self, fields: &ExtractedFields) -> ExtractedFields {
        let mut missing = fields.missing.clone();
        let mut clean = |field: Field| {
            let sanitized = self.sanitize(fields.get(field));
            if sanitized.is_empty() {
                if !missing.contains(&field) {
                    missing.push(field);
                }
                field.placeholder().to_string()
            } else {
                sanitized
            }
        };

        let invoice_number = clean(Field::InvoiceNumber);
        let schedule_date = clean(Field::ScheduleDate);
        let client_name = clean(Field::ClientName);
        missing.sort();

        ExtractedFields {
            invoice_number,
            schedule_date,
            client_name,
            missing,
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&NamingConfig::default())
    }
}
