//! Schedule date extraction.
//!
//! The date is free-form ("02/12/2023", "02 FEBRUARY 2023") and is kept
//! verbatim apart from collapsing separators, since it only ends up in a
//! filename.

use super::patterns::{DATE_SEPARATORS, SCHEDULE_LABEL};
use super::{non_empty_lines, ExtractionMatch, FieldExtractor};

pub use crate::models::config::ScheduleStrategy;

impl ScheduleStrategy {
    fn apply(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        let mut results = Vec::new();

        for caps in SCHEDULE_LABEL.captures_iter(text) {
            let (Some(full_match), Some(rest)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = rest.as_str().trim();

            match self {
                Self::SameLine if !value.is_empty() => {
                    results.push(
                        ExtractionMatch::new(value.to_string(), self.name(), full_match.as_str())
                            .with_position(rest.start(), rest.end()),
                    );
                }
                Self::NextLine if value.is_empty() => {
                    let next = non_empty_lines(&text[full_match.end()..])
                        .into_iter()
                        .next();
                    if let Some((offset, line)) = next {
                        let start = full_match.end() + offset;
                        results.push(
                            ExtractionMatch::new(line.to_string(), self.name(), full_match.as_str())
                                .with_position(start, start + line.len()),
                        );
                    }
                }
                _ => {}
            }
        }

        results
    }
}

/// Schedule date field extractor. Values are returned raw; see [`normalize_date`].
pub struct ScheduleDateExtractor {
    strategies: Vec<ScheduleStrategy>,
}

impl ScheduleDateExtractor {
    pub fn new() -> Self {
        Self {
            strategies: ScheduleStrategy::DEFAULT_ORDER.to_vec(),
        }
    }

    pub fn with_strategies(mut self, strategies: &[ScheduleStrategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }
}

impl Default for ScheduleDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ScheduleDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.apply(text).into_iter().next())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.strategies
            .iter()
            .flat_map(|strategy| strategy.apply(text))
            .collect()
    }
}

/// Collapse whitespace, `/`, `-` and `.` runs into single underscores.
///
/// Returns `None` when nothing but separators remains.
pub fn normalize_date(raw: &str) -> Option<String> {
    let collapsed = DATE_SEPARATORS.replace_all(raw.trim(), "_");
    let normalized = collapsed.trim_matches('_');
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Extract and normalize the schedule date using the default strategies.
pub fn extract_schedule_date(text: &str) -> Option<String> {
    ScheduleDateExtractor::new()
        .extract_all(text)
        .into_iter()
        .find_map(|m| normalize_date(&m.value))
}
