//! Common regex patterns for invoice field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number: "INVOICE NO: IN3048", "Invoice No. 42", "INVOICENO IN3048"
    pub static ref INVOICE_NO_LABEL: Regex = Regex::new(
        r"(?i)\bINVOICE\s*NO\b\.?[\s:#]*([0-9A-Za-z]+)"
    ).unwrap();

    // Invoice number without "NO": "Invoice # 1042", "INVOICE: 7731" (token must hold a digit)
    pub static ref INVOICE_INLINE: Regex = Regex::new(
        r"(?i)\bINVOICE[ \t]*(?:#|NUMBER\b|NUM\b\.?)?[ \t]*[:#]?[ \t]*([A-Za-z]*[0-9][0-9A-Za-z]*)"
    ).unwrap();

    // Schedule label and the rest of its line
    pub static ref SCHEDULE_LABEL: Regex = Regex::new(
        r"(?i)\bSchedule(?:d)?(?:[ \t]+Date)?\b[ \t]*[:\-]?[ \t]*([^\r\n]*)"
    ).unwrap();

    // Separators collapsed inside a schedule date
    pub static ref DATE_SEPARATORS: Regex = Regex::new(
        r"[\s/.\-]+"
    ).unwrap();

    // Attention label as a whole word ("ATTN:", "Attn."), not inside names like "Pattnaik"
    pub static ref ATTN_LABEL: Regex = Regex::new(
        r"(?i)\bATTN\b"
    ).unwrap();

    // Bare INVOICE header ending its line, followed by the span up to "INVOICE NO"
    pub static ref INVOICE_HEADER_SPAN: Regex = Regex::new(
        r"(?is)\bINVOICE[ \t]*\r?\n(.*?)\bINVOICE\s*NO\b"
    ).unwrap();

    // A line consisting only of the INVOICE header
    pub static ref INVOICE_HEADER_LINE: Regex = Regex::new(
        r"(?i)^\s*INVOICE\s*$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_no_label_variants() {
        for text in ["INVOICE NO: IN3048", "invoice no.IN3048", "INVOICE NO : IN3048", "INVOICENO IN3048"] {
            let caps = INVOICE_NO_LABEL.captures(text).unwrap();
            assert_eq!(&caps[1], "IN3048", "{}", text);
        }
    }

    #[test]
    fn test_invoice_no_label_ignores_words_starting_with_no() {
        assert!(INVOICE_NO_LABEL.captures("INVOICE NOTES follow").is_none());
    }

    #[test]
    fn test_inline_requires_digit() {
        assert!(INVOICE_INLINE.captures("INVOICE DATE: 01/01/2024").is_none());
        assert_eq!(&INVOICE_INLINE.captures("Invoice # 1042").unwrap()[1], "1042");
        assert_eq!(&INVOICE_INLINE.captures("INVOICE NUMBER: A17").unwrap()[1], "A17");
    }

    #[test]
    fn test_schedule_label_captures_rest_of_line() {
        let caps = SCHEDULE_LABEL.captures("Ref 1\nSchedule: 02/12/2023\nTotal").unwrap();
        assert_eq!(&caps[1], "02/12/2023");

        let caps = SCHEDULE_LABEL.captures("SCHEDULED DATE - 02 FEBRUARY 2023").unwrap();
        assert_eq!(&caps[1], "02 FEBRUARY 2023");
    }

    #[test]
    fn test_attn_label_is_a_whole_word() {
        assert!(ATTN_LABEL.is_match("ATTN: Jane"));
        assert!(ATTN_LABEL.is_match("attn."));
        assert!(!ATTN_LABEL.is_match("Pattnaik Holdings"));
        assert!(!ATTN_LABEL.is_match("ATTNDESK"));
    }

    #[test]
    fn test_header_line() {
        assert!(INVOICE_HEADER_LINE.is_match("  INVOICE "));
        assert!(!INVOICE_HEADER_LINE.is_match("INVOICE NO: 1"));
    }
}
