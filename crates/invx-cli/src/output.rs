//! Record serialization: JSON array, flat CSV, or plain-text summary.

use std::path::Path;

use invx_core::{DocType, ExtractedRecord};

/// Output format for extracted records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of record objects
    Json,
    /// Flattened CSV, one row per record
    Csv,
    /// Plain text summary
    Text,
}

/// Infer the output format from a file extension.
pub fn format_from_path(path: &Path) -> anyhow::Result<OutputFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("json") => Ok(OutputFormat::Json),
        Some("csv") => Ok(OutputFormat::Csv),
        Some("txt") => Ok(OutputFormat::Text),
        _ => anyhow::bail!(
            "unsupported output format for {}: use .json, .csv or .txt",
            path.display()
        ),
    }
}

/// Render a sequence of records in the requested format.
pub fn render_records(records: &[ExtractedRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Text => Ok(records.iter().map(render_text).collect::<Vec<_>>().join("\n")),
    }
}

fn render_csv(records: &[ExtractedRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "doc_type",
        "invoice_number",
        "invoice_date",
        "vendor_name",
        "total_amount",
        "currency",
        "source_file",
        "error",
    ])?;

    for record in records {
        let doc_type = match record.doc_type {
            DocType::Invoice => "invoice",
            DocType::Invalid => "invalid",
        };

        wtr.write_record([
            doc_type,
            record.invoice_number.as_deref().unwrap_or_default(),
            record.invoice_date.as_deref().unwrap_or_default(),
            record.vendor_name.as_deref().unwrap_or_default(),
            &record
                .total_amount
                .map(|a| a.to_string())
                .unwrap_or_default(),
            record.currency.as_deref().unwrap_or_default(),
            &record.source_file,
            record.error.as_deref().unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn render_text(record: &ExtractedRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!("File: {}\n", record.source_file));

    if let Some(error) = &record.error {
        out.push_str(&format!("  Invalid: {}\n", error));
        return out;
    }

    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();
    out.push_str(&format!("  Number:   {}\n", or_dash(record.invoice_number.as_deref())));
    out.push_str(&format!("  Date:     {}\n", or_dash(record.invoice_date.as_deref())));
    out.push_str(&format!("  Vendor:   {}\n", or_dash(record.vendor_name.as_deref())));
    out.push_str(&format!(
        "  Total:    {} {}\n",
        record
            .total_amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string()),
        or_dash(record.currency.as_deref())
    ));

    out
}
