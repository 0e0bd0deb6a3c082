//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default invoice-number patterns, in priority order. Group 1 captures
/// the code.
pub const DEFAULT_NUMBER_PATTERNS: [&str; 3] = [
    r"(?i)Invoice\s*#\s*[:\-]?\s*([A-Za-z0-9\-/]+)",
    r"(?i)Invoice\s*No[:\-]?\s*([A-Za-z0-9\-/]+)",
    r"(?i)(?:Inv|Bill)\s*(?:No|#)[:\-]?\s*([A-Za-z0-9\-/]+)",
];

/// Default date patterns. The labeled form comes first; the bare form
/// is the anywhere-in-text fallback. Group 1 captures the date text.
pub const DEFAULT_DATE_PATTERNS: [&str; 2] = [
    r"(?i)(?:Dated|Date|Invoice\s*Date)[:\-]?\s*([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}|[0-9]{4}[/\-][0-9]{1,2}[/\-][0-9]{1,2}|[0-9]{1,2}\s+[A-Za-z]+\s+[0-9]{2,4}|[A-Za-z]+\s+[0-9]{1,2},\s*[0-9]{4})",
    r"([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}|[0-9]{4}[/\-][0-9]{1,2}[/\-][0-9]{1,2}|[0-9]{1,2}\s+[A-Za-z]+\s+[0-9]{2,4}|[A-Za-z]+\s+[0-9]{1,2},\s*[0-9]{4})",
];

/// Default vendor patterns, tiered. When a pattern has a capture group
/// the group is taken, otherwise the whole match.
pub const DEFAULT_VENDOR_PATTERNS: [&str; 3] = [
    // A line naming a legal entity; address-looking candidates are
    // rejected separately, the regex crate has no lookarounds.
    r"(?im)^.*\b(?:Limited|Ltd|Pvt|LLP|Inc|Corporation|Corp|LLC|Company)\b.*$",
    // The line following a "Web:" header.
    r"(?i)Web.*?\n([A-Za-z0-9 ,&\.\-]+)",
    // First run of 2-4 capitalized words.
    r"\b([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+){1,3})\b",
];

/// Default labeled-total patterns. Group 1 captures the amount, an
/// optional group 2 a currency code before the amount.
pub const DEFAULT_TOTAL_PATTERNS: [&str; 1] =
    [r"(?i)(?:Total|Amount\s*Due|Invoice\s*Total|Balance\s*Due)[:\-\s]*(?:([A-Z]{3})\s*)?([\d,]+\.\d{2})"];

/// Recognized 3-letter currency codes.
pub const DEFAULT_CURRENCY_CODES: [&str; 6] = ["GBP", "USD", "INR", "EUR", "CAD", "AUD"];

/// Currency symbols mapped to codes, in detection order.
pub const DEFAULT_CURRENCY_SYMBOLS: [(&str, &str); 4] =
    [("£", "GBP"), ("₹", "INR"), ("€", "EUR"), ("$", "USD")];

/// Keywords that make text look like an invoice.
pub const DEFAULT_INVOICE_KEYWORDS: [&str; 3] = ["invoice", "total", "amount due"];

/// Main configuration for the invx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvxConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// LLM extraction configuration.
    pub llm: LlmConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum embedded text length before a document counts as scanned.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Field extraction configuration.
///
/// The pattern lists enumerate the recognized layouts per field so an
/// alternate vendor layout can be supplied without code changes. The
/// defaults target the single document family the tool was built for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Invoice number patterns, tried in order.
    pub number_patterns: Vec<String>,

    /// Date patterns, tried in order (labeled forms first).
    pub date_patterns: Vec<String>,

    /// Vendor name patterns, tried in order.
    pub vendor_patterns: Vec<String>,

    /// Labeled total-amount patterns, tried in order.
    pub total_patterns: Vec<String>,

    /// Recognized 3-letter currency codes.
    pub currency_codes: Vec<String>,

    /// Currency symbols mapped to codes, in detection order.
    pub currency_symbols: Vec<(String, String)>,

    /// Keywords that qualify text as an invoice.
    pub invoice_keywords: Vec<String>,

    /// Floor for the largest-amount fallback when no labeled total matches.
    pub amount_floor: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            number_patterns: to_strings(&DEFAULT_NUMBER_PATTERNS),
            date_patterns: to_strings(&DEFAULT_DATE_PATTERNS),
            vendor_patterns: to_strings(&DEFAULT_VENDOR_PATTERNS),
            total_patterns: to_strings(&DEFAULT_TOTAL_PATTERNS),
            currency_codes: to_strings(&DEFAULT_CURRENCY_CODES),
            currency_symbols: DEFAULT_CURRENCY_SYMBOLS
                .iter()
                .map(|(s, c)| (s.to_string(), c.to_string()))
                .collect(),
            invoice_keywords: to_strings(&DEFAULT_INVOICE_KEYWORDS),
            amount_floor: Decimal::new(100, 0),
        }
    }
}

fn to_strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

/// LLM extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model name.
    pub model: String,

    /// API endpoint base.
    pub endpoint: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl InvxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
