//! Split command - turn one multi-invoice PDF into a zip of renamed pages.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use invsplit_core::{split_document, PageStatus, SplitReport};

use super::{ensure_pdf, format_pages, load_config, OutputFormat};

/// Arguments for the split command.
#[derive(Args)]
pub struct SplitArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output archive (default: archive.file_name from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip pages with missing fields instead of using placeholders
    #[arg(long)]
    strict: bool,

    /// Write a per-page report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: SplitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path, args.strict)?;

    ensure_pdf(&args.input)?;

    info!("Splitting file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Reading PDF...");

    let data = fs::read(&args.input)?;

    pb.set_message("Splitting pages...");
    let result = split_document(&data, &config);
    pb.finish_and_clear();

    let outcome = result?;
    print_pages(&outcome.report);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.archive.file_name));

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, &outcome.archive)?;

    if let Some(report_path) = &args.report {
        let content = match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&outcome.report)?,
            format => format_pages(&outcome.report.pages, format)?,
        };
        fs::write(report_path, content)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            report_path.display()
        );
    }

    println!();
    println!("{} {}", style("✓").green(), outcome.report.summary());
    println!(
        "   {} entries written to {}",
        style(outcome.report.entries).green(),
        output_path.display()
    );
    if outcome.report.skipped > 0 {
        println!(
            "   {} pages skipped",
            style(outcome.report.skipped).yellow()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Print one feedback line per page; skipped and failed pages go to stderr.
pub(crate) fn print_pages(report: &SplitReport) {
    for page in &report.pages {
        match &page.status {
            PageStatus::Processed if page.overwritten => {
                println!("{} {}", style("!").yellow(), page.message())
            }
            PageStatus::Processed => println!("{} {}", style("✓").green(), page.message()),
            PageStatus::Skipped { .. } => eprintln!("{} {}", style("⚠").yellow(), page.message()),
            PageStatus::Failed { .. } => eprintln!("{} {}", style("✗").red(), page.message()),
        }
    }
}
