//! Invoice date extraction.
//!
//! Dates are kept as the captured text (trimmed), not reformatted. The
//! captured text is checked against the common layouts with `chrono`
//! only to rank confidence; an unparseable capture is still returned.

use chrono::NaiveDate;
use regex::Regex;

use super::{compile_patterns, ExtractionMatch, FieldExtractor};
use crate::extract::Result;

/// Layouts accepted by the default patterns: 05/01/2024, 05-01-24,
/// 2024-01-05, 05 Jan 2024, Jan 05, 2024.
const DATE_FORMATS: [&str; 10] = [
    "%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%d-%m-%y", "%Y-%m-%d", "%Y/%m/%d", "%d %b %Y",
    "%d %B %Y", "%b %d, %Y", "%B %d, %Y",
];

/// Date extractor with labeled patterns first, bare fallback last.
pub struct DateExtractor {
    patterns: Vec<Regex>,
}

impl DateExtractor {
    /// Compile the configured pattern list.
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: compile_patterns("invoice_date", patterns)?,
        })
    }
}

/// Parse a captured date text against the known layouts.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let normalized = collapse_spaces(text);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
}

fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for (tier, pattern) in self.patterns.iter().enumerate() {
            if let Some(caps) = pattern.captures(text) {
                let captured = caps.get(1).map_or("", |m| m.as_str()).trim();
                if captured.is_empty() {
                    continue;
                }

                let parseable = parse_date(captured).is_some();
                let confidence = match (tier, parseable) {
                    (0, true) => 0.95,
                    (0, false) => 0.75,
                    (_, true) => 0.8,
                    (_, false) => 0.6,
                };

                return Some(ExtractionMatch::new(captured.to_string(), confidence, &caps[0]));
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

    fn extractor() -> DateExtractor {
        DateExtractor::new(&ExtractionConfig::default().date_patterns).unwrap()
    }

    #[test]
    fn test_labeled_month_name() {
        let m = extractor().extract("Date: 05 Jan 2024").unwrap();
        assert_eq!(m.value, "05 Jan 2024");
        assert!(m.confidence > 0.9);
    }

    #[test]
    fn test_labeled_numeric() {
        let m = extractor().extract("Invoice Date: 03/11/2022").unwrap();
        assert_eq!(m.value, "03/11/2022");
    }

    #[test]
    fn test_iso_layout() {
        let m = extractor().extract("Dated 2024-01-05").unwrap();
        assert_eq!(m.value, "2024-01-05");
    }

    #[test]
    fn test_us_layout() {
        let m = extractor().extract("Date: Nov 03, 2022").unwrap();
        assert_eq!(m.value, "Nov 03, 2022");
    }

    #[test]
    fn test_unlabeled_fallback() {
        // No label anywhere; the bare pattern picks the date up.
        let m = extractor().extract("shipped on 05 Jan 2024 by courier").unwrap();
        assert_eq!(m.value, "05 Jan 2024");
        assert!(m.confidence < 0.9);
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("05 Jan 2024"), Some(expected));
        assert_eq!(parse_date("2024-01-05"), Some(expected));
        assert_eq!(parse_date("05/01/2024"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
    }
}
