//! Per-page and per-document results of a split run.

use serde::{Deserialize, Serialize};

use super::fields::{ExtractedFields, Field};

/// Outcome for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageStatus {
    /// Written to the archive.
    Processed,
    /// Left out because fields were missing.
    Skipped { missing: Vec<Field> },
    /// Left out because the page could not be split.
    Failed { reason: String },
}

/// Report for one source page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    /// Page number (1-indexed).
    pub page: u32,
    /// Sanitized fields.
    pub fields: ExtractedFields,
    /// Composed archive entry name.
    pub filename: String,
    #[serde(flatten)]
    pub status: PageStatus,
    /// The entry replaced an earlier page with the same filename.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub overwritten: bool,
}

impl PageReport {
    pub fn is_processed(&self) -> bool {
        self.status == PageStatus::Processed
    }

    /// One-line status message for user feedback.
    pub fn message(&self) -> String {
        match &self.status {
            PageStatus::Processed if self.overwritten => format!(
                "Processed page {}: {} (replaced an earlier page with the same name)",
                self.page, self.filename
            ),
            PageStatus::Processed => format!("Processed page {}: {}", self.page, self.filename),
            PageStatus::Skipped { missing } => {
                let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
                format!(
                    "Skipped page {}: missing {}",
                    self.page,
                    names.join(", ")
                )
            }
            PageStatus::Failed { reason } => {
                format!("Failed page {}: {}", self.page, reason)
            }
        }
    }
}

/// Summary of a whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitReport {
    /// Pages in the source document.
    pub total_pages: u32,
    /// Per-page results in page order.
    pub pages: Vec<PageReport>,
    /// Pages written to the archive, counting overwritten ones.
    pub processed: u32,
    /// Pages left out of the archive.
    pub skipped: u32,
    /// Pages whose filename had already been used.
    pub collisions: u32,
    /// Distinct entries in the archive.
    pub entries: u32,
}

impl SplitReport {
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Default::default()
        }
    }

    /// Record a page, updating the counters.
    pub fn push(&mut self, page: PageReport) {
        if page.is_processed() {
            self.processed += 1;
            if page.overwritten {
                self.collisions += 1;
            } else {
                self.entries += 1;
            }
        } else {
            self.skipped += 1;
        }
        self.pages.push(page);
    }

    /// Final summary line.
    pub fn summary(&self) -> String {
        format!("All done! {} invoices processed.", self.processed)
    }
}
