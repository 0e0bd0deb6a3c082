//! Extracted invoice record model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// Usable invoice text.
    Invoice,
    /// Empty text or text that does not look like an invoice.
    Invalid,
}

/// Structured fields extracted from one document.
///
/// Invariant: when `doc_type` is [`DocType::Invalid`] all extraction
/// fields are `None` and `error` is set; when it is
/// [`DocType::Invoice`] `error` is `None`. Use the constructors to
/// uphold this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Document classification.
    pub doc_type: DocType,

    /// Invoice number as it appears on the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Invoice date, kept as the captured text (trimmed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,

    /// Vendor/issuer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Total amount due.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// 3-letter currency code (symbols are mapped to codes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Originating file name.
    pub source_file: String,

    /// Reason the document was rejected, only for invalid records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractedRecord {
    /// Create an empty invoice record for `source_file`.
    pub fn invoice(source_file: impl Into<String>) -> Self {
        Self {
            doc_type: DocType::Invoice,
            invoice_number: None,
            invoice_date: None,
            vendor_name: None,
            total_amount: None,
            currency: None,
            source_file: source_file.into(),
            error: None,
        }
    }

    /// Create an invalid record with an explanatory error.
    pub fn invalid(source_file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            doc_type: DocType::Invalid,
            invoice_number: None,
            invoice_date: None,
            vendor_name: None,
            total_amount: None,
            currency: None,
            source_file: source_file.into(),
            error: Some(error.into()),
        }
    }

    /// Typed access to one extraction field.
    pub fn value_of(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::InvoiceNumber => self.invoice_number.as_deref().map(FieldValue::Text),
            Field::InvoiceDate => self.invoice_date.as_deref().map(FieldValue::Text),
            Field::VendorName => self.vendor_name.as_deref().map(FieldValue::Text),
            Field::TotalAmount => self.total_amount.map(FieldValue::Amount),
            Field::Currency => self.currency.as_deref().map(FieldValue::Text),
        }
    }

    /// Names of extraction fields that are still absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Field::ALL
            .iter()
            .filter(|f| self.value_of(**f).is_none())
            .map(|f| f.as_str())
            .collect()
    }
}

/// The five extraction fields, with their stable serialized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    InvoiceNumber,
    InvoiceDate,
    VendorName,
    TotalAmount,
    Currency,
}

impl Field {
    /// All extraction fields, in output order.
    pub const ALL: [Field; 5] = [
        Field::InvoiceNumber,
        Field::InvoiceDate,
        Field::VendorName,
        Field::TotalAmount,
        Field::Currency,
    ];

    /// Serialized field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::InvoiceNumber => "invoice_number",
            Field::InvoiceDate => "invoice_date",
            Field::VendorName => "vendor_name",
            Field::TotalAmount => "total_amount",
            Field::Currency => "currency",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value viewed for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Amount(Decimal),
}

impl std::fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Amount(d) => write!(f, "{}", d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_invalid_record_has_no_fields() {
        let record = ExtractedRecord::invalid("x.pdf", "Not an invoice document or empty text");
        assert_eq!(record.doc_type, DocType::Invalid);
        assert!(record.error.is_some());
        for field in Field::ALL {
            assert!(record.value_of(field).is_none());
        }
    }

    #[test]
    fn test_invalid_record_serializes_without_fields() {
        let record = ExtractedRecord::invalid("X.pdf", "Not an invoice document or empty text");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["doc_type"], "invalid");
        assert_eq!(json["source_file"], "X.pdf");
        assert_eq!(json["error"], "Not an invoice document or empty text");
        assert!(json.get("invoice_number").is_none());
        assert!(json.get("total_amount").is_none());
    }

    #[test]
    fn test_missing_fields() {
        let mut record = ExtractedRecord::invoice("a.pdf");
        record.invoice_number = Some("S2401-34".to_string());
        record.total_amount = Some(Decimal::from_str("27743.11").unwrap());

        assert_eq!(
            record.missing_fields(),
            vec!["invoice_date", "vendor_name", "currency"]
        );
    }

    #[test]
    fn test_record_roundtrip() {
        let mut record = ExtractedRecord::invoice("inv.pdf");
        record.invoice_number = Some("S2401-34".to_string());
        record.currency = Some("GBP".to_string());

        let json = serde_json::to_string(&record).unwrap();
        let back: ExtractedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
