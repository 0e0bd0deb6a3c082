//! Invoice number extraction.

use regex::Regex;

use super::{compile_patterns, ExtractionMatch, FieldExtractor};
use crate::extract::Result;

/// Invoice number extractor with ordered label patterns.
pub struct NumberExtractor {
    patterns: Vec<Regex>,
}

impl NumberExtractor {
    /// Compile the configured pattern list.
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: compile_patterns("invoice_number", patterns)?,
        })
    }
}

impl FieldExtractor for NumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for (tier, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                let code = caps.get(1).map_or("", |m| m.as_str()).trim();

                // Email addresses near an "Invoice" label are the common
                // false positive; skip and keep looking.
                if code.is_empty() || code.contains('@') {
                    continue;
                }

                // Earlier tiers are the explicit label forms.
                let confidence = if tier == 0 { 0.95 } else { 0.85 };
                return Some(ExtractionMatch::new(code.to_string(), confidence, &caps[0]));
            }
        }

        None
    }
}
