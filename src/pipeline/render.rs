//! Output renderers: normalized text plus attribution in, payloads out.
//!
//! Three closed variants, dispatched by [`OutputFormat`], each with a
//! single-document, merged, and per-unit shape. One rule holds across all of
//! them: every rendered payload is attributed to its originating document's
//! file name, so provenance survives merging.
//!
//! Renderers are pure — they never mutate input and perform no I/O. The only
//! `Result` plumbing is serde's, which cannot fail for the record types used
//! here.

use crate::config::OutputFormat;
use crate::error::Doc2TextError;
use crate::output::ConversionResult;
use serde::{Deserialize, Serialize};

/// Delimiter line inserted between sources in merged plain-text output.
fn plain_delimiter(source: &str) -> String {
    format!("--- START SOURCE: {source} ---")
}

/// Heading line prepended to Markdown payloads.
fn markdown_heading(source: &str) -> String {
    format!("# source: {source}")
}

/// One whole document as a JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub source: String,
    pub content: String,
}

/// One extraction unit as a JSON record. `unit` is the 1-based ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub source: String,
    pub unit: usize,
    pub content: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Doc2TextError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Doc2TextError::Internal(format!("JSON serialisation failed: {e}")))
}

/// Render one document to a single payload.
pub fn render_single(
    result: &ConversionResult,
    format: OutputFormat,
) -> Result<String, Doc2TextError> {
    match format {
        OutputFormat::Plain => Ok(result.text.joined()),
        OutputFormat::Markdown => Ok(format!(
            "{}\n\n{}",
            markdown_heading(&result.source_name()),
            result.text.joined()
        )),
        OutputFormat::Json => to_json(&DocumentRecord {
            source: result.source_name(),
            content: result.text.joined(),
        }),
    }
}

/// Render a merge batch to one combined payload, in batch (= selection) order.
pub fn render_merged(
    batch: &[ConversionResult],
    format: OutputFormat,
) -> Result<String, Doc2TextError> {
    match format {
        OutputFormat::Plain => {
            let mut out = String::new();
            for (index, result) in batch.iter().enumerate() {
                if index > 0 {
                    out.push_str("\n\n");
                    out.push_str(&plain_delimiter(&result.source_name()));
                    out.push_str("\n\n");
                }
                out.push_str(&result.text.joined());
            }
            Ok(out)
        }
        OutputFormat::Markdown => {
            let sections: Vec<String> = batch
                .iter()
                .map(|result| {
                    format!(
                        "{}\n\n{}",
                        markdown_heading(&result.source_name()),
                        result.text.joined()
                    )
                })
                .collect();
            Ok(sections.join("\n\n"))
        }
        OutputFormat::Json => {
            let records: Vec<DocumentRecord> = batch
                .iter()
                .map(|result| DocumentRecord {
                    source: result.source_name(),
                    content: result.text.joined(),
                })
                .collect();
            to_json(&records)
        }
    }
}

/// Render one document to one payload per extraction unit.
///
/// The result must carry per-unit text; handing a whole-document result to
/// the per-unit renderer is a contract violation, not a runtime condition.
pub fn render_per_unit(
    result: &ConversionResult,
    format: OutputFormat,
) -> Result<Vec<String>, Doc2TextError> {
    let units = result.text.units().ok_or_else(|| {
        Doc2TextError::Internal("per-unit rendering requires per-unit extraction".into())
    })?;

    let source = result.source_name();
    units
        .iter()
        .enumerate()
        .map(|(index, content)| {
            let ordinal = index + 1;
            match format {
                OutputFormat::Plain => Ok(content.clone()),
                OutputFormat::Markdown => Ok(format!(
                    "{} (page {ordinal})\n\n{content}",
                    markdown_heading(&source)
                )),
                OutputFormat::Json => to_json(&UnitRecord {
                    source: source.clone(),
                    unit: ordinal,
                    content: content.clone(),
                }),
            }
        })
        .collect()
}
