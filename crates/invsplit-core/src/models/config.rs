//! Configuration structures for the splitting pipeline.

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

/// Main configuration for the invsplit pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Filename sanitization configuration.
    pub naming: NamingConfig,

    /// Output archive configuration.
    pub archive: ArchiveConfig,
}

/// Named heuristics for locating the client name, tried in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStrategy {
    /// `ATTN:` label, value on the same line or the next non-empty line.
    Attn,
    /// First line between a bare `INVOICE` header and the `INVOICE NO` label.
    BetweenHeaders,
    /// Line following an `INVOICE` header line, unless it looks like a label.
    AfterHeader,
}

impl ClientStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attn => "attn",
            Self::BetweenHeaders => "between_headers",
            Self::AfterHeader => "after_header",
        }
    }
}

/// Ways an invoice number is written on a page, tried in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceNumberStrategy {
    /// `INVOICE NO: IN3048`
    Labeled,
    /// `Invoice # 1042`, token must contain a digit.
    Inline,
}

impl InvoiceNumberStrategy {
    pub const DEFAULT_ORDER: [InvoiceNumberStrategy; 2] = [Self::Labeled, Self::Inline];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Labeled => "labeled",
            Self::Inline => "inline",
        }
    }
}

/// Where the value of a schedule label is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStrategy {
    /// Remainder of the label's own line.
    SameLine,
    /// First non-empty line after a label with nothing behind it.
    NextLine,
}

impl ScheduleStrategy {
    pub const DEFAULT_ORDER: [ScheduleStrategy; 2] = [Self::SameLine, Self::NextLine];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SameLine => "same_line",
            Self::NextLine => "next_line",
        }
    }
}

/// What to do with a page when a field falls back to its placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Keep the page and use the placeholder value.
    #[default]
    Placeholder,
    /// Leave the page out of the archive and report it.
    Skip,
}

/// Invoice field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Invoice number heuristics in priority order.
    pub invoice_strategies: Vec<InvoiceNumberStrategy>,

    /// Schedule date heuristics in priority order.
    pub schedule_strategies: Vec<ScheduleStrategy>,

    /// Client name heuristics in priority order.
    pub client_strategies: Vec<ClientStrategy>,

    /// Markers that disqualify a client candidate found after an `INVOICE` header.
    pub label_markers: Vec<String>,

    /// Placeholder substitution or page skipping.
    pub missing_fields: MissingFieldPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            invoice_strategies: InvoiceNumberStrategy::DEFAULT_ORDER.to_vec(),
            schedule_strategies: ScheduleStrategy::DEFAULT_ORDER.to_vec(),
            client_strategies: vec![
                ClientStrategy::Attn,
                ClientStrategy::BetweenHeaders,
                ClientStrategy::AfterHeader,
            ],
            label_markers: ["ATTN", "DATE", "NO :", "TEL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            missing_fields: MissingFieldPolicy::Placeholder,
        }
    }
}

/// How spaces inside a field are written into the filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacePolicy {
    /// Collapse whitespace runs into a single underscore.
    #[default]
    Underscore,
    /// Drop whitespace entirely.
    Remove,
}

/// Filename sanitization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Whitespace handling, applied to all three fields.
    pub spaces: SpacePolicy,

    /// Symbols kept in addition to letters and digits.
    pub allowed_symbols: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            spaces: SpacePolicy::Underscore,
            allowed_symbols: "_".to_string(),
        }
    }
}

/// Output archive configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Default archive file name offered for download.
    pub file_name: String,

    /// Deflate entries instead of storing them.
    pub compress: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            file_name: "split_invoices.zip".to_string(),
            compress: false,
        }
    }
}

/// Symbols that would let a field escape its path component, or that some
/// filesystems reject.
const FORBIDDEN_SYMBOLS: &[char] = &['/', '\\', '.', ':', '\0', '*', '?', '"', '<', '>', '|'];

impl SplitterConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check the configuration for values the pipeline cannot honour.
    pub fn validate(&self) -> Result<(), SplitError> {
        if let Some(c) = self
            .naming
            .allowed_symbols
            .chars()
            .find(|c| FORBIDDEN_SYMBOLS.contains(c) || c.is_whitespace() || c.is_control())
        {
            return Err(SplitError::Config(format!(
                "naming.allowed_symbols may not contain {:?}",
                c
            )));
        }

        let strategy_lists = [
            ("invoice_strategies", self.extraction.invoice_strategies.is_empty()),
            ("schedule_strategies", self.extraction.schedule_strategies.is_empty()),
            ("client_strategies", self.extraction.client_strategies.is_empty()),
        ];
        if let Some((name, _)) = strategy_lists.iter().find(|(_, empty)| *empty) {
            return Err(SplitError::Config(format!(
                "extraction.{} must name at least one strategy",
                name
            )));
        }

        if self.archive.file_name.trim().is_empty() {
            return Err(SplitError::Config("archive.file_name is empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SplitterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SplitterConfig =
            serde_json::from_str(r#"{"extraction": {"missing_fields": "skip"}}"#).unwrap();

        assert_eq!(config.extraction.missing_fields, MissingFieldPolicy::Skip);
        assert_eq!(config.extraction.client_strategies.len(), 3);
        assert_eq!(config.naming.spaces, SpacePolicy::Underscore);
        assert_eq!(config.archive.file_name, "split_invoices.zip");
    }

    #[test]
    fn test_rejects_path_separator_symbol() {
        let mut config = SplitterConfig::default();
        config.naming.allowed_symbols = "_/".to_string();

        assert!(matches!(config.validate(), Err(SplitError::Config(_))));
    }

    #[test]
    fn test_rejects_empty_strategy_list() {
        let mut config = SplitterConfig::default();
        config.extraction.client_strategies.clear();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_symbols_unsafe_on_windows() {
        for symbol in ['*', '?', '"', '<', '>', '|'] {
            let mut config = SplitterConfig::default();
            config.naming.allowed_symbols = format!("_{}", symbol);

            assert!(
                matches!(config.validate(), Err(SplitError::Config(_))),
                "{:?} should be rejected",
                symbol
            );
        }
    }

    #[test]
    fn test_rejects_empty_invoice_or_schedule_strategies() {
        let mut config = SplitterConfig::default();
        config.extraction.invoice_strategies.clear();
        assert!(config.validate().is_err());

        let mut config = SplitterConfig::default();
        config.extraction.schedule_strategies.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invoice_and_schedule_strategies_from_json() {
        let config: SplitterConfig = serde_json::from_str(
            r#"{"extraction": {"invoice_strategies": ["labeled"], "schedule_strategies": ["next_line", "same_line"]}}"#,
        )
        .unwrap();

        assert_eq!(config.extraction.invoice_strategies, vec![InvoiceNumberStrategy::Labeled]);
        assert_eq!(
            config.extraction.schedule_strategies,
            vec![ScheduleStrategy::NextLine, ScheduleStrategy::SameLine]
        );
        assert_eq!(config.extraction.client_strategies.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strategy_names_match_serde() {
        let config = ExtractionConfig::default();
        let names = config
            .client_strategies
            .iter()
            .map(|s| (serde_json::to_string(s).unwrap(), s.name()))
            .chain(
                config
                    .invoice_strategies
                    .iter()
                    .map(|s| (serde_json::to_string(s).unwrap(), s.name())),
            )
            .chain(
                config
                    .schedule_strategies
                    .iter()
                    .map(|s| (serde_json::to_string(s).unwrap(), s.name())),
            );

        for (json, name) in names {
            assert_eq!(json, format!("\"{}\"", name));
        }
    }
}
