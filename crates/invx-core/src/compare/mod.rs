//! Record comparison and accuracy scoring.
//!
//! Normalization is fixed here rather than per call site: text fields
//! are trimmed, case-folded and have internal whitespace collapsed;
//! amounts are rounded to 2 decimal places; currency codes compare
//! case-insensitively. Scores are percentages rounded to one decimal.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::record::{ExtractedRecord, Field, FieldValue};

/// Ground truth: source file name mapped to the expected record.
pub type GroundTruthSet = HashMap<String, ExtractedRecord>;

/// Field-level differences and per-strategy accuracy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Field name to the differing pair of values. A field appears only
    /// when both records have a value for it and the normalized values
    /// differ.
    pub differences: BTreeMap<String, (String, String)>,

    /// Strategy name to percentage of fields matching a reference.
    pub accuracy: BTreeMap<String, f64>,
}

impl ComparisonResult {
    /// True when the compared records agree on every shared field.
    pub fn is_match(&self) -> bool {
        self.differences.is_empty()
    }
}

/// Normalized form of a field value used for equality.
fn normalize(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Text(s) => s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase(),
        FieldValue::Amount(d) => d.round_dp(2).normalize().to_string(),
    }
}

fn fields_equal(a: FieldValue<'_>, b: FieldValue<'_>) -> bool {
    normalize(a) == normalize(b)
}

/// Compare two records field by field.
///
/// Symmetric up to pair order: `compare(a, b)` and `compare(b, a)`
/// flag the same fields, with the pair values swapped.
pub fn compare(a: &ExtractedRecord, b: &ExtractedRecord) -> ComparisonResult {
    let mut result = ComparisonResult::default();

    for field in Field::ALL {
        let (Some(left), Some(right)) = (a.value_of(field), b.value_of(field)) else {
            continue;
        };

        if !fields_equal(left, right) {
            result
                .differences
                .insert(field.as_str().to_string(), (left.to_string(), right.to_string()));
        }
    }

    result
}

/// Score a record against ground truth.
///
/// Percentage of ground-truth-populated fields the record matches,
/// rounded to one decimal place. Fields absent in the ground truth are
/// excluded from the denominator. A ground truth with zero populated
/// fields scores 0.0 by convention.
pub fn score(record: &ExtractedRecord, ground_truth: &ExtractedRecord) -> f64 {
    let mut populated = 0u32;
    let mut matching = 0u32;

    for field in Field::ALL {
        let Some(expected) = ground_truth.value_of(field) else {
            continue;
        };
        populated += 1;

        if let Some(actual) = record.value_of(field) {
            if fields_equal(actual, expected) {
                matching += 1;
            }
        }
    }

    if populated == 0 {
        warn!(
            "[{}] ground truth has no populated fields, scoring 0.0",
            ground_truth.source_file
        );
        return 0.0;
    }

    let pct = f64::from(matching) / f64::from(populated) * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Look up and score against a ground truth set.
///
/// A missing or structurally wrong entry is reported as `None`, never
/// as an error: a bad ground truth line must not fail the batch.
pub fn score_against(record: &ExtractedRecord, ground_truth: &GroundTruthSet) -> Option<f64> {
    match ground_truth.get(&record.source_file) {
        Some(expected) => Some(score(record, expected)),
        None => {
            warn!(
                "[{}] no ground truth entry, skipping score",
                record.source_file
            );
            None
        }
    }
}

/// Parse a ground truth JSON mapping, skipping malformed entries.
pub fn parse_ground_truth(value: serde_json::Value) -> Result<GroundTruthSet, serde_json::Error> {
    let entries: HashMap<String, serde_json::Value> = serde_json::from_value(value)?;

    let mut set = GroundTruthSet::with_capacity(entries.len());
    for (file, entry) in entries {
        match serde_json::from_value::<ExtractedRecord>(entry) {
            Ok(mut record) => {
                // The key is authoritative for lookups.
                record.source_file = file.clone();
                set.insert(file, record);
            }
            Err(e) => {
                warn!("[{}] malformed ground truth entry skipped: {}", file, e);
            }
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::DocType;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn sample() -> ExtractedRecord {
        let mut record = ExtractedRecord::invoice("inv.pdf");
        record.invoice_number = Some("S2401-34".to_string());
        record.invoice_date = Some("05 Jan 2024".to_string());
        record.vendor_name = Some("Renishaw UK Sales Limited".to_string());
        record.total_amount = Some(Decimal::from_str("27743.11").unwrap());
        record.currency = Some("GBP".to_string());
        record
    }

    #[test]
    fn test_compare_identical_is_empty() {
        let a = sample();
        assert!(compare(&a, &a).is_match());
    }

    #[test]
    fn test_compare_flags_differences() {
        let a = sample();
        let mut b = sample();
        b.invoice_number = Some("S2401-35".to_string());
        b.total_amount = Some(Decimal::from_str("100.00").unwrap());

        let result = compare(&a, &b);
        assert_eq!(result.differences.len(), 2);
        assert_eq!(
            result.differences["invoice_number"],
            ("S2401-34".to_string(), "S2401-35".to_string())
        );
    }

    #[test]
    fn test_compare_symmetric_field_set() {
        let a = sample();
        let mut b = sample();
        b.vendor_name = Some("Someone Else Ltd".to_string());

        let ab = compare(&a, &b);
        let ba = compare(&b, &a);

        let ab_fields: Vec<_> = ab.differences.keys().collect();
        let ba_fields: Vec<_> = ba.differences.keys().collect();
        assert_eq!(ab_fields, ba_fields);

        // Pair order flips with argument order.
        let (x, y) = &ab.differences["vendor_name"];
        let (p, q) = &ba.differences["vendor_name"];
        assert_eq!((x, y), (q, p));
    }

    #[test]
    fn test_compare_ignores_one_sided_fields() {
        let a = sample();
        let mut b = sample();
        b.currency = None;

        // Only one record has the value; not a difference.
        assert!(compare(&a, &b).is_match());
    }

    #[test]
    fn test_text_normalization() {
        let a = sample();
        let mut b = sample();
        b.vendor_name = Some("  renishaw   uk sales LIMITED ".to_string());
        b.currency = Some("gbp".to_string());

        assert!(compare(&a, &b).is_match());
    }

    #[test]
    fn test_amount_normalization() {
        let a = sample();
        let mut b = sample();
        // Same amount to 2 decimal places.
        b.total_amount = Some(Decimal::from_str("27743.110").unwrap());

        assert!(compare(&a, &b).is_match());
        assert_eq!(score(&b, &a), 100.0);
    }

    #[test]
    fn test_score_full_match() {
        assert_eq!(score(&sample(), &sample()), 100.0);
    }

    #[test]
    fn test_score_partial() {
        let mut record = sample();
        record.invoice_number = Some("WRONG".to_string());
        record.currency = None;

        // 3 of 5 populated ground truth fields match.
        assert_eq!(score(&record, &sample()), 60.0);
    }

    #[test]
    fn test_score_excludes_unpopulated_ground_truth() {
        let mut truth = sample();
        truth.vendor_name = None;
        truth.invoice_date = None;

        // Denominator is the 3 populated fields.
        assert_eq!(score(&sample(), &truth), 100.0);

        let mut record = sample();
        record.currency = Some("USD".to_string());
        assert_eq!(score(&record, &truth), 66.7);
    }

    #[test]
    fn test_score_no_match() {
        let record = ExtractedRecord::invoice("inv.pdf");
        assert_eq!(score(&record, &sample()), 0.0);
    }

    #[test]
    fn test_score_empty_ground_truth_is_zero_by_convention() {
        // An undefined score (no populated ground truth fields) is
        // reported as 0.0, documented here as the chosen convention.
        let empty = ExtractedRecord::invoice("inv.pdf");
        assert_eq!(score(&sample(), &empty), 0.0);
    }

    #[test]
    fn test_parse_ground_truth_skips_malformed() {
        let value = json!({
            "a.pdf": {
                "doc_type": "invoice",
                "invoice_number": "S2401-34",
                "source_file": "a.pdf"
            },
            "b.pdf": {"doc_type": "no-such-type", "source_file": "b.pdf"},
        });

        let set = parse_ground_truth(value).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set["a.pdf"].doc_type, DocType::Invoice);
        assert_eq!(set["a.pdf"].invoice_number.as_deref(), Some("S2401-34"));
    }

    #[test]
    fn test_score_against_missing_entry() {
        let set = GroundTruthSet::new();
        assert_eq!(score_against(&sample(), &set), None);
    }
}
