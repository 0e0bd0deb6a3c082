//! Regex-based record extraction.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::config::ExtractionConfig;
use crate::models::record::ExtractedRecord;

use super::rules::{
    AmountExtractor, CurrencyDetector, DateExtractor, FieldExtractor, NumberExtractor,
    VendorExtractor,
};
use super::{RecordExtractor, Result};

/// Error string recorded on rejected documents.
pub const NOT_AN_INVOICE: &str = "Not an invoice document or empty text";

/// Rule-based field extractor.
///
/// Pure over its input text: applies the configured pattern rules per
/// field, first match wins, unmatched fields stay absent. Only empty
/// or non-invoice text produces an invalid record.
pub struct RegexExtractor {
    number: NumberExtractor,
    date: DateExtractor,
    vendor: VendorExtractor,
    amount: AmountExtractor,
    currency: CurrencyDetector,
    keywords: Vec<String>,
    symbols: Vec<String>,
}

impl RegexExtractor {
    /// Build an extractor from configured patterns.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            number: NumberExtractor::new(&config.number_patterns)?,
            date: DateExtractor::new(&config.date_patterns)?,
            vendor: VendorExtractor::new(&config.vendor_patterns)?,
            amount: AmountExtractor::new(&config.total_patterns, config.amount_floor)?,
            currency: CurrencyDetector::new(&config.currency_codes, &config.currency_symbols)?,
            keywords: config
                .invoice_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            symbols: config
                .currency_symbols
                .iter()
                .map(|(symbol, _)| symbol.clone())
                .collect(),
        })
    }

    /// Build an extractor with the default patterns.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default()).expect("default patterns compile")
    }

    /// Lightweight "looks like an invoice" heuristic: at least one
    /// recognized keyword or currency symbol in non-empty text.
    fn looks_like_invoice(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let lowered = text.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
            || self.symbols.iter().any(|s| text.contains(s.as_str()))
    }

    /// Synchronous extraction; the trait impl wraps this.
    pub fn extract_record(&self, text: &str, source_file: &str) -> ExtractedRecord {
        if !self.looks_like_invoice(text) {
            warn!("[{}] rejected: {}", source_file, NOT_AN_INVOICE);
            return ExtractedRecord::invalid(source_file, NOT_AN_INVOICE);
        }

        let mut record = ExtractedRecord::invoice(source_file);

        match self.number.extract(text) {
            Some(m) => record.invoice_number = Some(m.value),
            None => warn!("[{}] invoice number not found", source_file),
        }

        match self.date.extract(text) {
            Some(m) => record.invoice_date = Some(m.value),
            None => warn!("[{}] invoice date not found", source_file),
        }

        match self.vendor.extract(text) {
            Some(m) => record.vendor_name = Some(m.value),
            None => warn!("[{}] vendor name not found", source_file),
        }

        match self.amount.extract(text) {
            Some(m) => record.total_amount = Some(m.value),
            None => warn!("[{}] total amount not found", source_file),
        }

        match self.currency.detect(text) {
            Some(code) => record.currency = Some(code),
            None => warn!("[{}] currency not detected", source_file),
        }

        debug!(
            "[{}] extracted record, missing: {:?}",
            source_file,
            record.missing_fields()
        );

        record
    }
}

impl Default for RegexExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordExtractor for RegexExtractor {
    fn name(&self) -> &'static str {
        "regex"
    }

    async fn extract(&self, text: &str, source_file: &str) -> Result<ExtractedRecord> {
        Ok(self.extract_record(text, source_file))
    }
}
