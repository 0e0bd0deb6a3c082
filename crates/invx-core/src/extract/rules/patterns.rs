//! Shared regex patterns for field extraction.
//!
//! The per-field match patterns live in
//! [`ExtractionConfig`](crate::models::config::ExtractionConfig); the
//! patterns here are fixed helpers used across rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any amount with optional thousands separators: 27,743.11
    pub static ref AMOUNT_ANY: Regex = Regex::new(r"[\d,]+\.\d{2}").unwrap();

    /// A line that looks like part of an address rather than a name.
    pub static ref ADDRESS_LINE: Regex = Regex::new(
        r"(?i)\b(Street|Road|Rd|Avenue|Ave|Lane|Ln|Drive|Dr|Gloucestershire|USA|U\.S\.A\.|India|United Kingdom)\b"
    ).unwrap();

    /// Trailing country/region noise to strip off a vendor name.
    pub static ref VENDOR_TRAILING: Regex = Regex::new(
        r"(?i)\b(United\s+Kingdom|India|USA|U\.S\.A\.|Gloucestershire.*)$"
    ).unwrap();
}
