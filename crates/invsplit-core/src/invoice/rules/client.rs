//! Client name extraction.
//!
//! Invoices put the addressee in different places depending on the layout,
//! so several heuristics are tried in the configured order.

use tracing::trace;

use super::patterns::{ATTN_LABEL, INVOICE_HEADER_LINE, INVOICE_HEADER_SPAN};
use super::{non_empty_lines, ExtractionMatch, FieldExtractor};
use crate::models::config::{ClientStrategy, ExtractionConfig};

/// Client name field extractor.
pub struct ClientNameExtractor {
    strategies: Vec<ClientStrategy>,
    label_markers: Vec<String>,
}

impl ClientNameExtractor {
    /// Create an extractor with the default strategy order and markers.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            strategies: config.client_strategies.clone(),
            label_markers: config
                .label_markers
                .iter()
                .map(|m| m.to_uppercase())
                .collect(),
        }
    }

    /// Restrict or reorder the strategies.
    pub fn with_strategies(mut self, strategies: &[ClientStrategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }

    fn apply(&self, strategy: ClientStrategy, text: &str) -> Vec<ExtractionMatch<String>> {
        let results = match strategy {
            ClientStrategy::Attn => from_attn(text),
            ClientStrategy::BetweenHeaders => from_header_span(text),
            ClientStrategy::AfterHeader => self.from_header_line(text),
        };
        trace!("client strategy {} found {} candidates", strategy.name(), results.len());
        results
    }

    fn looks_like_label(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.label_markers.iter().any(|m| upper.contains(m.as_str()))
    }

    fn from_header_line(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        let lines = non_empty_lines(text);
        let mut results = Vec::new();

        for (i, (_, line)) in lines.iter().enumerate() {
            if !INVOICE_HEADER_LINE.is_match(line) {
                continue;
            }
            if let Some(&(offset, candidate)) = lines.get(i + 1) {
                if self.looks_like_label(candidate) || INVOICE_HEADER_LINE.is_match(candidate) {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(
                        candidate.to_string(),
                        ClientStrategy::AfterHeader.name(),
                        *line,
                    )
                    .with_position(offset, offset + candidate.len()),
                );
            }
        }

        results
    }
}

impl Default for ClientNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ClientNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.strategies
            .iter()
            .find_map(|strategy| self.apply(*strategy, text).into_iter().next())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.strategies
            .iter()
            .flat_map(|strategy| self.apply(*strategy, text))
            .collect()
    }
}

/// `ATTN : Jane Doe`, or `ATTN` with the name on the next non-empty line.
fn from_attn(text: &str) -> Vec<ExtractionMatch<String>> {
    let lines = non_empty_lines(text);
    let mut results = Vec::new();

    for (i, &(offset, line)) in lines.iter().enumerate() {
        if !ATTN_LABEL.is_match(line) {
            continue;
        }

        if let Some(colon) = line.find(':') {
            let value = line[colon + 1..].trim();
            if !value.is_empty() {
                let start = offset + colon + 1 + (line[colon + 1..].len() - line[colon + 1..].trim_start().len());
                results.push(
                    ExtractionMatch::new(value.to_string(), ClientStrategy::Attn.name(), line)
                        .with_position(start, start + value.len()),
                );
                continue;
            }
        }

        if let Some(&(next_offset, next)) = lines.get(i + 1) {
            results.push(
                ExtractionMatch::new(next.to_string(), ClientStrategy::Attn.name(), line)
                    .with_position(next_offset, next_offset + next.len()),
            );
        }
    }

    results
}

/// First line between a bare `INVOICE` header and the `INVOICE NO` label.
fn from_header_span(text: &str) -> Vec<ExtractionMatch<String>> {
    INVOICE_HEADER_SPAN
        .captures_iter(text)
        .filter_map(|caps| {
            let span = caps.get(1)?;
            let (offset, line) = non_empty_lines(span.as_str()).into_iter().next()?;
            let start = span.start() + offset;
            Some(
                ExtractionMatch::new(
                    line.to_string(),
                    ClientStrategy::BetweenHeaders.name(),
                    caps.get(0)?.as_str(),
                )
                .with_position(start, start + line.len()),
            )
        })
        .collect()
}

/// Extract the client name using the default strategies.
pub fn extract_client_name(text: &str) -> Option<String> {
    ClientNameExtractor::new().extract(text).map(|m| m.value)
}
