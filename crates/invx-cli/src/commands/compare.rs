//! Compare command - run both extraction strategies per document and
//! report where they disagree, optionally scored against ground truth.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{info, warn};

use invx_core::compare::{compare, parse_ground_truth, score_against, ComparisonResult};
use invx_core::{ExtractedRecord, ExtractionError, GroundTruthSet};

use super::{build_extractor, collect_inputs, load_config, read_document, source_name, Mode};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Input PDF file, directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Ground truth JSON file keyed by source file name
    #[arg(short, long)]
    ground_truth: Option<PathBuf>,

    /// Write a JSON report with both records and the comparison per
    /// document
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct CompareReport {
    regex: ExtractedRecord,
    llm: ExtractedRecord,
    comparison: ComparisonResult,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let files = collect_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No PDF files found for: {}", args.input);
    }

    let truth = args
        .ground_truth
        .as_deref()
        .map(load_ground_truth)
        .transpose()?;

    let regex_extractor = build_extractor(Mode::Regex, &config)?;
    let llm_extractor = build_extractor(Mode::Llm, &config)?;

    info!("Comparing strategies on {} files", files.len());

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let (source, document) = match read_document(path, &config) {
            Ok(read) => read,
            Err(e) => {
                // An unreadable file stays in the report as a pair of
                // invalid records, the run keeps going.
                warn!("Failed to read {}: {}", path.display(), e);
                let reason = format!("unreadable document: {}", e);
                reports.push(CompareReport {
                    regex: ExtractedRecord::invalid(source_name(path), reason.clone()),
                    llm: ExtractedRecord::invalid(source_name(path), reason),
                    comparison: ComparisonResult::default(),
                });
                continue;
            }
        };

        let regex_record = regex_extractor.extract(&document.text, &source).await?;
        let llm_record = llm_extractor.extract(&document.text, &source).await?;

        let mut comparison = compare(&regex_record, &llm_record);
        if let Some(truth) = &truth {
            if let Some(accuracy) = score_against(&regex_record, truth) {
                comparison.accuracy.insert("regex".to_string(), accuracy);
            }
            if let Some(accuracy) = score_against(&llm_record, truth) {
                comparison.accuracy.insert("llm".to_string(), accuracy);
            }
        }

        print_comparison(&source, &comparison);
        reports.push(CompareReport {
            regex: regex_record,
            llm: llm_record,
            comparison,
        });
    }

    if let Some(output_path) = &args.output {
        fs::write(output_path, serde_json::to_string_pretty(&reports)?)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    }

    Ok(())
}

fn print_comparison(source: &str, comparison: &ComparisonResult) {
    println!("{}", style(source).bold());

    if comparison.is_match() {
        println!(
            "  {} strategies agree on every shared field",
            style("✓").green()
        );
    } else {
        println!("  {}", style("differences (regex vs llm):").yellow());
        for (field, (left, right)) in &comparison.differences {
            println!("    {}: {} | {}", style(field).bold(), left, right);
        }
    }

    for (strategy, pct) in &comparison.accuracy {
        println!("  {} accuracy vs ground truth: {:.1}%", strategy, pct);
    }
}

/// Read the ground truth mapping; any failure to read or parse the file
/// as a whole is an error, while malformed individual entries are
/// skipped during parsing.
fn load_ground_truth(path: &std::path::Path) -> anyhow::Result<GroundTruthSet> {
    let content = fs::read_to_string(path)
        .map_err(|e| ExtractionError::GroundTruth(format!("{}: {}", path.display(), e)))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ExtractionError::GroundTruth(format!("{}: {}", path.display(), e)))?;
    let truth = parse_ground_truth(value)
        .map_err(|e| ExtractionError::GroundTruth(format!("{}: {}", path.display(), e)))?;
    Ok(truth)
}
