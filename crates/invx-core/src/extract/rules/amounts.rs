//! Total amount and currency extraction.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_ANY;
use super::{compile_patterns, ExtractionMatch, FieldExtractor};
use crate::error::ExtractionError;
use crate::extract::Result;

/// Total amount extractor: labeled total lines first, then the largest
/// free-standing amount above the configured floor.
pub struct AmountExtractor {
    totals: Vec<Regex>,
    floor: Decimal,
}

impl AmountExtractor {
    /// Compile the configured labeled-total patterns.
    pub fn new(totals: &[String], floor: Decimal) -> Result<Self> {
        Ok(Self {
            totals: compile_patterns("total_amount", totals)?,
            floor,
        })
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for pattern in &self.totals {
            if let Some(caps) = pattern.captures(text) {
                let raw = caps
                    .name("amount")
                    .or_else(|| caps.get(caps.len() - 1))
                    .map_or("", |m| m.as_str());
                if let Some(amount) = parse_amount(raw) {
                    return Some(ExtractionMatch::new(amount, 0.95, &caps[0]));
                }
            }
        }

        // No labeled total; take the largest amount above the floor.
        AMOUNT_ANY
            .find_iter(text)
            .filter_map(|m| parse_amount(m.as_str()))
            .filter(|amount| *amount > self.floor)
            .max()
            .map(|amount| ExtractionMatch::new(amount, 0.6, "largest amount"))
    }
}

/// Parse an amount with optional thousands separators ("27,743.11").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Decimal::from_str(&cleaned).ok()
}

/// Currency detection: a 3-letter code anywhere in the text, else a
/// known symbol mapped to its code.
pub struct CurrencyDetector {
    code_pattern: Regex,
    symbols: Vec<(String, String)>,
}

impl CurrencyDetector {
    /// Build the detector from the configured codes and symbol map.
    pub fn new(codes: &[String], symbols: &[(String, String)]) -> Result<Self> {
        let alternation = codes
            .iter()
            .map(|c| regex::escape(c))
            .collect::<Vec<_>>()
            .join("|");
        let code_pattern = Regex::new(&format!(r"(?i)\b({})\b", alternation)).map_err(|source| {
            ExtractionError::Pattern {
                field: "currency".to_string(),
                source,
            }
        })?;

        Ok(Self {
            code_pattern,
            symbols: symbols.to_vec(),
        })
    }

    /// Detect the document currency, if any.
    pub fn detect(&self, text: &str) -> Option<String> {
        if let Some(caps) = self.code_pattern.captures(text) {
            return Some(caps[1].to_uppercase());
        }

        self.symbols
            .iter()
            .find(|(symbol, _)| text.contains(symbol.as_str()))
            .map(|(_, code)| code.clone())
    }
}
