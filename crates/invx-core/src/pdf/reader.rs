//! PDF reading using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::debug;

use super::{DocumentText, Result, TextProvider};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text reader.
///
/// Embedded text comes from `pdf-extract`; `lopdf` supplies the page
/// count, empty-password decryption, and the image scan used to flag
/// scanned documents.
#[derive(Debug, Default)]
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }

    fn load(&self, data: &[u8]) -> Result<(Document, Vec<u8>)> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption.
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok((doc, raw_data))
    }

    /// Whether the document carries any image XObject.
    fn has_images(doc: &Document) -> bool {
        doc.objects.values().any(|object| {
            let Object::Stream(stream) = object else {
                return false;
            };
            stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false)
        })
    }
}

impl TextProvider for PdfReader {
    fn provide(&self, data: &[u8], config: &PdfConfig) -> Result<DocumentText> {
        let (doc, raw_data) = self.load(data)?;
        let pages = doc.get_pages().len() as u32;

        let text = pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        // Low embedded text plus page images means the document is a
        // scan and would need OCR to read.
        let scanned = text.trim().len() < config.min_text_length && Self::has_images(&doc);

        debug!(
            "PDF: {} pages, {} chars embedded text, scanned={}",
            pages,
            text.trim().len(),
            scanned
        );

        Ok(DocumentText {
            text,
            scanned,
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_data_is_parse_error() {
        let reader = PdfReader::new();
        let err = reader
            .provide(b"this is not a pdf", &PdfConfig::default())
            .unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }
}
