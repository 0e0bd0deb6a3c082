//! Invoice field extraction module.

mod extractor;
pub mod rules;

pub use extractor::RegexExtractor;

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::models::record::ExtractedRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// One extraction capability with interchangeable implementations.
///
/// The regex extractor and the LLM-backed extractor both implement this
/// contract; callers select a strategy and receive the same record
/// shape. A document that is not an invoice is a successful extraction
/// of an invalid record, not an `Err`.
#[async_trait]
pub trait RecordExtractor: Send + Sync {
    /// Strategy name used in comparison reports and logs.
    fn name(&self) -> &'static str;

    /// Extract structured fields from document text.
    async fn extract(&self, text: &str, source_file: &str) -> Result<ExtractedRecord>;
}
