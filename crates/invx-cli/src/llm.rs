//! LLM-backed extraction strategy using the Gemini API.
//!
//! The model is asked for strict JSON; replies still arrive wrapped in
//! markdown fences or prose often enough that the parser strips both
//! before deserializing. A failed request or unparseable reply degrades
//! to an empty invoice record rather than failing the document.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

use invx_core::extract::rules::parse_amount;
use invx_core::extract::{RecordExtractor, Result};
use invx_core::{ExtractedRecord, ExtractionError, LlmConfig};

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)^```(?:json)?\s*|\s*```$").unwrap();
    static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// Gemini-backed record extractor.
pub struct GeminiExtractor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiExtractor {
    /// Build the extractor, reading the API key from the configured
    /// environment variable. Fails before any document is processed
    /// when the key is absent.
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            anyhow::anyhow!(
                "LLM mode needs an API key: set the {} environment variable",
                config.api_key_env
            )
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn prompt(text: &str) -> String {
        format!(
            "You are an AI that extracts structured data from invoices.\n\
             Return output strictly in JSON with the following keys:\n\
             - doc_type (always \"invoice\")\n\
             - invoice_number\n\
             - invoice_date\n\
             - vendor_name\n\
             - total_amount\n\
             - currency\n\n\
             Invoice text:\n{}",
            text
        )
    }

    async fn request_fields(&self, text: &str, source_file: &str) -> Result<ExtractedRecord> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::prompt(text),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(provider_error)?
            .error_for_status()
            .map_err(provider_error)?
            .json::<GenerateResponse>()
            .await
            .map_err(provider_error)?;

        let reply = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim())
            .ok_or_else(|| ExtractionError::Provider {
                provider: "gemini".to_string(),
                reason: "empty response".to_string(),
            })?;

        debug!("[{}] raw LLM reply: {}", source_file, reply);
        parse_reply(reply, source_file)
    }
}

fn provider_error(e: reqwest::Error) -> ExtractionError {
    ExtractionError::Provider {
        provider: "gemini".to_string(),
        reason: e.to_string(),
    }
}

/// Parse a model reply into a record: strip markdown fences, locate the
/// JSON object, deserialize leniently.
fn parse_reply(reply: &str, source_file: &str) -> Result<ExtractedRecord> {
    let without_fences = CODE_FENCE.replace_all(reply.trim(), "");
    let json_text = JSON_OBJECT
        .find(&without_fences)
        .map(|m| m.as_str())
        .unwrap_or(&without_fences);

    let value: Value =
        serde_json::from_str(json_text).map_err(|e| ExtractionError::Provider {
            provider: "gemini".to_string(),
            reason: format!("unparseable reply: {}", e),
        })?;

    let text_field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    let mut record = ExtractedRecord::invoice(source_file);
    record.invoice_number = text_field("invoice_number");
    record.invoice_date = text_field("invoice_date");
    record.vendor_name = text_field("vendor_name");
    record.currency = text_field("currency").map(|c| c.to_uppercase());
    record.total_amount = match value.get("total_amount") {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
        Some(Value::String(s)) => parse_amount(s),
        _ => None,
    };

    Ok(record)
}

#[async_trait]
impl RecordExtractor for GeminiExtractor {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn extract(&self, text: &str, source_file: &str) -> Result<ExtractedRecord> {
        match self.request_fields(text, source_file).await {
            Ok(record) => Ok(record),
            Err(e) => {
                // Contained per document: an API failure produces an
                // empty record, not a batch abort.
                warn!("[{}] LLM extraction failed: {}", source_file, e);
                Ok(ExtractedRecord::invoice(source_file))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_json() {
        let reply = r#"{"doc_type": "invoice", "invoice_number": "S2401-34",
                        "invoice_date": "05 Jan 2024", "vendor_name": "Renishaw UK Sales Limited",
                        "total_amount": 27743.11, "currency": "GBP"}"#;

        let record = parse_reply(reply, "a.pdf").unwrap();
        assert_eq!(record.invoice_number.as_deref(), Some("S2401-34"));
        assert_eq!(record.total_amount, Decimal::from_str("27743.11").ok());
        assert_eq!(record.currency.as_deref(), Some("GBP"));
        assert_eq!(record.source_file, "a.pdf");
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"invoice_number\": \"A-1\", \"currency\": \"usd\"}\n```";
        let record = parse_reply(reply, "b.pdf").unwrap();
        assert_eq!(record.invoice_number.as_deref(), Some("A-1"));
        assert_eq!(record.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let reply = "Here is the extracted data:\n{\"invoice_number\": \"B-2\"}\nLet me know!";
        let record = parse_reply(reply, "c.pdf").unwrap();
        assert_eq!(record.invoice_number.as_deref(), Some("B-2"));
    }

    #[test]
    fn test_parse_amount_as_string() {
        let reply = r#"{"total_amount": "27,743.11"}"#;
        let record = parse_reply(reply, "d.pdf").unwrap();
        assert_eq!(record.total_amount, Decimal::from_str("27743.11").ok());
    }

    #[test]
    fn test_null_and_empty_fields_stay_absent() {
        let reply = r#"{"invoice_number": null, "vendor_name": "  ", "currency": "GBP"}"#;
        let record = parse_reply(reply, "e.pdf").unwrap();
        assert!(record.invoice_number.is_none());
        assert!(record.vendor_name.is_none());
        assert_eq!(record.currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn test_unparseable_reply_is_provider_error() {
        let err = parse_reply("the invoice looks fine to me", "f.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Provider { .. }));
    }
}
