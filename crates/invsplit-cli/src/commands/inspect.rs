//! Inspect command - show the fields found on each page without splitting.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use invsplit_core::inspect_document;

use super::{ensure_pdf, format_pages, load_config, OutputFormat};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path, false)?;

    ensure_pdf(&args.input)?;

    info!("Inspecting file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let pages = inspect_document(&data, &config)?;
    let output = format_pages(&pages, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
