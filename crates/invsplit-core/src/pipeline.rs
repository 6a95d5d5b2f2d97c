//! Stateless split-and-rename pipeline: PDF bytes in, zip archive out.

use tracing::{debug, info, warn};

use crate::error::{Result, SplitError};
use crate::invoice::{FieldParser, InvoiceParser};
use crate::models::config::{MissingFieldPolicy, SplitterConfig};
use crate::models::report::{PageReport, PageStatus, SplitReport};
use crate::output::{compose_filename, ArchiveBuilder, OutputEntry, Sanitizer};
use crate::pdf::{PdfExtractor, PdfPage, PdfProcessor};

/// Archive bytes and the report describing how they were built.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Zip archive with one single-page PDF per processed page.
    pub archive: Vec<u8>,
    /// Per-page report.
    pub report: SplitReport,
}

/// Fields and filename of one page, without splitting.
///
/// Under the skip policy a page with missing fields is marked skipped.
fn describe_page(
    page: &PdfPage,
    parser: &FieldParser,
    sanitizer: &Sanitizer,
    policy: MissingFieldPolicy,
) -> PageReport {
    let extraction = parser.parse(&page.text);
    for warning in &extraction.warnings {
        debug!("Page {}: {}", page.number, warning);
    }

    let fields = sanitizer.sanitize_fields(&extraction.fields);
    let filename = compose_filename(&fields);

    let status = if policy == MissingFieldPolicy::Skip && !fields.is_complete() {
        PageStatus::Skipped {
            missing: fields.missing.clone(),
        }
    } else {
        PageStatus::Processed
    };

    PageReport {
        page: page.number,
        fields,
        filename,
        status,
        overwritten: false,
    }
}

/// Split a PDF held in memory into a renamed single-page archive.
pub fn split_document(data: &[u8], config: &SplitterConfig) -> Result<SplitOutcome> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    split_with(&extractor, config)
}

/// Split an already loaded document.
pub fn split_with<P: PdfProcessor>(processor: &P, config: &SplitterConfig) -> Result<SplitOutcome> {
    config.validate()?;

    let parser = FieldParser::from_config(&config.extraction);
    let sanitizer = Sanitizer::new(&config.naming);
    let policy = config.extraction.missing_fields;
    let mut archive = ArchiveBuilder::new().with_compression(config.archive.compress);

    let pages = processor.extract_pages();
    let mut report = SplitReport::new(pages.len() as u32);
    info!("Splitting document with {} pages", pages.len());

    for page in &pages {
        let mut page_report = describe_page(page, &parser, &sanitizer, policy);

        if !page_report.is_processed() {
            warn!("{}", page_report.message());
            report.push(page_report);
            continue;
        }

        match processor.split_page(page.number) {
            Ok(data) => {
                page_report.overwritten = archive.add(OutputEntry {
                    filename: page_report.filename.clone(),
                    data,
                });
                debug!("{}", page_report.message());
            }
            Err(e) => {
                page_report.status = PageStatus::Failed {
                    reason: e.to_string(),
                };
                warn!("{}", page_report.message());
            }
        }

        report.push(page_report);
    }

    if report.processed == 0 {
        return Err(SplitError::NothingProcessed {
            total: report.total_pages,
            skipped: report.skipped,
        });
    }

    info!(
        "Processed {} of {} pages into {} entries",
        report.processed,
        report.total_pages,
        archive.len()
    );
    let archive = archive.finish()?;

    Ok(SplitOutcome { archive, report })
}

/// Extract fields and filenames for every page without splitting.
pub fn inspect_document(data: &[u8], config: &SplitterConfig) -> Result<Vec<PageReport>> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    inspect_with(&extractor, config)
}

/// Extract fields and filenames from an already loaded document.
pub fn inspect_with<P: PdfProcessor>(processor: &P, config: &SplitterConfig) -> Result<Vec<PageReport>> {
    config.validate()?;

    let parser = FieldParser::from_config(&config.extraction);
    let sanitizer = Sanitizer::new(&config.naming);

    Ok(processor
        .extract_pages()
        .iter()
        .map(|page| describe_page(page, &parser, &sanitizer, config.extraction.missing_fields))
        .collect())
}

/// Extract and sanitize the fields of a single page of text.
pub fn describe_text(text: &str, config: &SplitterConfig) -> PageReport {
    let parser = FieldParser::from_config(&config.extraction);
    let sanitizer = Sanitizer::new(&config.naming);
    describe_page(
        &PdfPage::new(1, text),
        &parser,
        &sanitizer,
        config.extraction.missing_fields,
    )
}
