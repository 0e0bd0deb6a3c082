//! Vendor name extraction.
//!
//! Tiered rules: a line naming a legal entity is the strongest signal,
//! then the line following a "Web:" header, then the first run of
//! capitalized words. Candidates that look like address lines are
//! rejected and trailing country noise is stripped.

use regex::Regex;

use super::patterns::{ADDRESS_LINE, VENDOR_TRAILING};
use super::{compile_patterns, ExtractionMatch, FieldExtractor};
use crate::extract::Result;

/// Vendor name extractor with ordered tier patterns.
pub struct VendorExtractor {
    patterns: Vec<Regex>,
}

impl VendorExtractor {
    /// Compile the configured pattern list.
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: compile_patterns("vendor_name", patterns)?,
        })
    }

    fn cleanup(candidate: &str) -> Option<String> {
        // Strip trailing country noise first, then reject what still
        // looks like an address.
        let cleaned = VENDOR_TRAILING
            .replace(candidate.trim(), "")
            .trim_matches([',', ' '])
            .to_string();

        if cleaned.is_empty() || ADDRESS_LINE.is_match(&cleaned) {
            return None;
        }

        Some(cleaned)
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for (tier, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                // Tier patterns with a capture group name the candidate;
                // whole-line patterns use the full match.
                let candidate = caps
                    .get(1)
                    .or_else(|| caps.get(0))
                    .map_or("", |m| m.as_str());

                if let Some(vendor) = Self::cleanup(candidate) {
                    let confidence = match tier {
                        0 => 0.9,
                        1 => 0.7,
                        _ => 0.5,
                    };
                    return Some(ExtractionMatch::new(vendor, confidence, &caps[0]));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;
    use pretty_assertions::assert_eq;

    fn extractor() -> VendorExtractor {
        VendorExtractor::new(&ExtractionConfig::default().vendor_patterns).unwrap()
    }

    #[test]
    fn test_legal_entity_line() {
        let text = "Invoice\nRenishaw UK Sales Limited\nNew Mills, Wotton-under-Edge\n";
        let m = extractor().extract(text).unwrap();
        assert_eq!(m.value, "Renishaw UK Sales Limited");
        assert!(m.confidence > 0.8);
    }

    #[test]
    fn test_web_header_fallback() {
        let text = "Tel: 0123\nWeb: www.acme.example\nAcme Supplies\nPO Box 9\n";
        let m = extractor().extract(text).unwrap();
        assert_eq!(m.value, "Acme Supplies");
    }

    #[test]
    fn test_address_line_rejected() {
        // The legal-entity tier must not fall for an address line; the
        // capitalized-words tier then picks the actual name.
        let text = "Globex Industries\n12 High Street\n";
        let m = extractor().extract(text).unwrap();
        assert_eq!(m.value, "Globex Industries");
    }

    #[test]
    fn test_trailing_country_stripped() {
        let text = "Initech Corp, United Kingdom\ninvoice total due\n";
        let m = extractor().extract(text).unwrap();
        assert_eq!(m.value, "Initech Corp");
    }

    #[test]
    fn test_no_vendor() {
        assert!(extractor().extract("lowercase only text 123\n").is_none());
    }
}
