//! CLI command implementations.

pub mod batch;
pub mod compare;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, warn};

use invx_core::extract::{RecordExtractor, RegexExtractor};
use invx_core::pdf::{DocumentText, PdfReader, TextProvider};
use invx_core::{ExtractedRecord, InvxConfig};

use crate::llm::GeminiExtractor;

/// Extraction strategy selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Pattern-based extraction, no network access
    Regex,
    /// LLM-based extraction via the Gemini API
    Llm,
}

pub(crate) fn load_config(path: Option<&str>) -> anyhow::Result<InvxConfig> {
    match path {
        Some(path) => Ok(InvxConfig::from_file(Path::new(path))?),
        None => Ok(InvxConfig::default()),
    }
}

pub(crate) fn build_extractor(
    mode: Mode,
    config: &InvxConfig,
) -> anyhow::Result<Box<dyn RecordExtractor>> {
    match mode {
        Mode::Regex => Ok(Box::new(RegexExtractor::from_config(&config.extraction)?)),
        Mode::Llm => Ok(Box::new(GeminiExtractor::from_config(&config.llm)?)),
    }
}

/// File name used as the record key in outputs and ground truth.
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

/// A directory input means every .pdf directly inside it; anything else
/// is treated as a glob pattern (a plain file path matches itself).
pub(crate) fn collect_inputs(input: &str) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = if Path::new(input).is_dir() {
        format!("{}/*.pdf", input.trim_end_matches('/'))
    } else {
        input.to_string()
    };

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Read one PDF into its text layer.
pub(crate) fn read_document(
    path: &Path,
    config: &InvxConfig,
) -> anyhow::Result<(String, DocumentText)> {
    let source = source_name(path);
    let data = std::fs::read(path)?;

    let document = PdfReader::new().provide(&data, &config.pdf)?;
    debug!(
        "[{}] {} pages, {} chars of text",
        source,
        document.pages,
        document.text.len()
    );

    if document.scanned {
        warn!(
            "[{}] looks scanned, text layer may be incomplete (OCR not attempted)",
            source
        );
    }

    Ok((source, document))
}

/// Read one PDF and run the extractor over its text layer.
pub(crate) async fn extract_record(
    path: &Path,
    extractor: &dyn RecordExtractor,
    config: &InvxConfig,
) -> anyhow::Result<ExtractedRecord> {
    let (source, document) = read_document(path, config)?;
    Ok(extractor.extract(&document.text, &source).await?)
}
