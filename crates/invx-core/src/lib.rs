//! Core library for invoice field extraction.
//!
//! This crate provides:
//! - PDF text extraction with scanned-document detection
//! - Regex-based invoice field extraction (number, date, vendor, total, currency)
//! - Record comparison and accuracy scoring against ground truth
//! - Data models for extracted records and configuration

pub mod compare;
pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;

pub use error::{ExtractionError, InvxError, PdfError, Result};
pub use models::config::{ExtractionConfig, InvxConfig, LlmConfig, PdfConfig};
pub use models::record::{DocType, ExtractedRecord, Field, FieldValue};
pub use pdf::{DocumentText, PdfReader, TextProvider};
pub use extract::{RecordExtractor, RegexExtractor};
pub use compare::{compare, score, ComparisonResult, GroundTruthSet};
