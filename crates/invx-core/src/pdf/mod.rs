//! PDF text provider.

mod reader;

pub use reader::PdfReader;

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Plain-text view of one document, as handed to the extractors.
#[derive(Debug, Clone)]
pub struct DocumentText {
    /// Extracted text, possibly empty for scanned documents.
    pub text: String,
    /// True when embedded text was too short and the document carries
    /// page images, i.e. it would need OCR to read.
    pub scanned: bool,
    /// Number of pages.
    pub pages: u32,
}

/// Trait for document text providers.
pub trait TextProvider {
    /// Read a document into plain text.
    fn provide(&self, data: &[u8], config: &PdfConfig) -> Result<DocumentText>;
}
