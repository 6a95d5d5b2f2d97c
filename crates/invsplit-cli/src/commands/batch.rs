//! Batch command - split every PDF matching a glob pattern.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use invsplit_core::models::config::SplitterConfig;
use invsplit_core::{split_document, SplitReport};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the input PDFs
    #[arg(required = true)]
    input: String,

    /// Output directory for the archives
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip pages with missing fields instead of using placeholders
    #[arg(long)]
    strict: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of splitting a single file.
struct FileResult {
    path: PathBuf,
    archive: Option<PathBuf>,
    report: Option<SplitReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path, args.strict)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = split_single_file(&path, &output_dir, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((archive, report)) => {
                debug!("{}: {}", path.display(), report.summary());
                results.push(FileResult {
                    path,
                    archive: Some(archive),
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to split {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        archive: None,
                        report: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to split {}: {}", path.display(), error_msg);
                    anyhow::bail!("Splitting {} failed: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    if args.summary {
        let summary_path = output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful: Vec<_> = results.iter().filter(|r| r.report.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let invoices: u32 = successful
        .iter()
        .filter_map(|r| r.report.as_ref())
        .map(|r| r.processed)
        .sum();

    println!();
    println!(
        "{} Split {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} invoices",
        style(successful.len()).green(),
        style(failed.len()).red(),
        invoices
    );

    for result in &successful {
        if let Some(archive) = &result.archive {
            println!("   {} -> {}", result.path.display(), archive.display());
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn split_single_file(
    path: &Path,
    output_dir: &Path,
    config: &SplitterConfig,
) -> anyhow::Result<(PathBuf, SplitReport)> {
    let data = fs::read(path)?;
    let outcome = split_document(&data, config)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("invoices");
    let archive_path = output_dir.join(format!("{}.zip", stem));

    fs::write(&archive_path, &outcome.archive)?;
    debug!("Wrote archive to {}", archive_path.display());

    Ok((archive_path, outcome.report))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "archive",
        "total_pages",
        "processed",
        "skipped",
        "collisions",
        "entries",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(report) = &result.report {
            let archive = result
                .archive
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            wtr.write_record([
                filename,
                "success",
                &archive,
                &report.total_pages.to_string(),
                &report.processed.to_string(),
                &report.skipped.to_string(),
                &report.collisions.to_string(),
                &report.entries.to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
