//! Batch command - process a directory or glob of invoice PDFs into one
//! output file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use invx_core::{DocType, ExtractedRecord};

use super::{build_extractor, collect_inputs, extract_record, load_config, source_name, Mode};
use crate::output::{format_from_path, render_records};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Combined output file; format inferred from the extension
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Extraction strategy
    #[arg(short, long, value_enum, default_value = "regex")]
    mode: Mode,

    /// Leave invalid documents out of the output
    #[arg(long)]
    skip_invalid: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // The output format is checked before any document is read.
    let format = format_from_path(&args.output)?;

    let files = collect_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No PDF files found for: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let extractor = build_extractor(args.mode, &config)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        let record = match extract_record(path, extractor.as_ref(), &config).await {
            Ok(record) => record,
            Err(e) => {
                // An unreadable file becomes an invalid record so the
                // batch keeps going and the failure stays visible.
                warn!("Failed to process {}: {}", path.display(), e);
                ExtractedRecord::invalid(source_name(path), format!("unreadable document: {}", e))
            }
        };
        records.push(record);
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let invalid = records
        .iter()
        .filter(|r| r.doc_type == DocType::Invalid)
        .count();
    let valid = records.len() - invalid;

    if args.skip_invalid {
        records.retain(|r| r.doc_type != DocType::Invalid);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, render_records(&records, format)?)?;

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   {} valid, {} invalid{}",
        style(valid).green(),
        style(invalid).red(),
        if args.skip_invalid && invalid > 0 {
            " (skipped)"
        } else {
            ""
        }
    );
    println!(
        "{} Output written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}
