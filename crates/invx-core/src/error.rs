//! Error types for the invx-core library.

use thiserror::Error;

/// Main error type for the invx library.
#[derive(Error, Debug)]
pub enum InvxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to field extraction.
///
/// Note: a document that is not an invoice and a field with no matching
/// rule are NOT errors. Both are regular outcomes recorded on the
/// [`ExtractedRecord`](crate::models::record::ExtractedRecord) itself.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A configured field pattern failed to compile.
    #[error("invalid pattern for {field}: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// An extraction provider (e.g. an LLM backend) failed.
    #[error("provider {provider} failed: {reason}")]
    Provider { provider: String, reason: String },

    /// Ground truth file could not be read or parsed at all.
    #[error("ground truth unreadable: {0}")]
    GroundTruth(String),
}

/// Result type for the invx library.
pub type Result<T> = std::result::Result<T, InvxError>;
