//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod inspect;
pub mod split;

use std::path::Path;

use tracing::debug;

use invsplit_core::models::config::{MissingFieldPolicy, SplitterConfig};
use invsplit_core::{PageReport, PageStatus};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Load the configuration from `--config`, the user config file, or defaults.
pub fn load_config(config_path: Option<&str>, strict: bool) -> anyhow::Result<SplitterConfig> {
    let mut config = if let Some(path) = config_path {
        SplitterConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e))?
    } else {
        let default_path = config::default_config_path();
        if default_path.exists() {
            debug!("Using config file {}", default_path.display());
            SplitterConfig::from_file(&default_path)?
        } else {
            SplitterConfig::default()
        }
    };

    if strict {
        config.extraction.missing_fields = MissingFieldPolicy::Skip;
    }

    config.validate()?;
    Ok(config)
}

/// Check that the input exists and has a `.pdf` extension.
pub fn ensure_pdf(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "pdf" {
        anyhow::bail!("Unsupported file format: {} (expected .pdf)", path.display());
    }

    Ok(())
}

/// Render page reports in the requested format.
pub fn format_pages(pages: &[PageReport], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(pages)?),
        OutputFormat::Csv => format_csv(pages),
        OutputFormat::Text => Ok(format_text(pages)),
    }
}

fn status_label(status: &PageStatus) -> &'static str {
    match status {
        PageStatus::Processed => "processed",
        PageStatus::Skipped { .. } => "skipped",
        PageStatus::Failed { .. } => "failed",
    }
}

fn format_csv(pages: &[PageReport]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "page",
        "invoice_number",
        "schedule_date",
        "client_name",
        "filename",
        "status",
        "missing",
    ])?;

    for page in pages {
        let missing: Vec<String> = page.fields.missing.iter().map(|f| f.to_string()).collect();
        wtr.write_record([
            &page.page.to_string(),
            &page.fields.invoice_number,
            &page.fields.schedule_date,
            &page.fields.client_name,
            &page.filename,
            status_label(&page.status),
            &missing.join("; "),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(pages: &[PageReport]) -> String {
    let mut output = String::new();

    for page in pages {
        output.push_str(&format!("Page {}: {}\n", page.page, page.filename));
        output.push_str(&format!("  Invoice: {}\n", page.fields.invoice_number));
        output.push_str(&format!("  Date:    {}\n", page.fields.schedule_date));
        output.push_str(&format!("  Client:  {}\n", page.fields.client_name));
        if !page.is_processed() {
            output.push_str(&format!("  {}\n", page.message()));
        }
    }

    output
}
