//! Rule-based field extractors.
//!
//! Each extractor holds an ordered list of compiled patterns (built
//! from [`ExtractionConfig`](crate::models::config::ExtractionConfig))
//! and produces the first match. Unmatched fields are simply absent.

pub mod amounts;
pub mod dates;
pub mod number;
pub mod patterns;
pub mod vendor;

pub use amounts::{parse_amount, AmountExtractor, CurrencyDetector};
pub use dates::DateExtractor;
pub use number::NumberExtractor;
pub use vendor::VendorExtractor;

use regex::Regex;

use crate::error::ExtractionError;
use crate::extract::Result;

/// Trait for single-field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, first rule that matches wins.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// An extracted value with confidence and provenance.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            source: source.into(),
        }
    }
}

/// Compile a configured pattern list, reporting the offending field on
/// failure.
pub(crate) fn compile_patterns(field: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| ExtractionError::Pattern {
                field: field.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_patterns_reports_field() {
        let err = compile_patterns("invoice_number", &["(".to_string()]).unwrap_err();
        assert!(err.to_string().contains("invoice_number"));
    }
}
