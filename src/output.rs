//! Data handed between pipeline stages: normalized text, per-document
//! conversion results, and the run summary.

use crate::config::OutputFormat;
use crate::document::DocumentDescriptor;
use crate::error::UnitError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Normalized plain text produced by a converter.
///
/// `PerUnit` keeps one string per extraction unit, indexed by ordinal.
/// Invariant: the sequence length equals the unit count reported by the
/// extraction source — failed or empty units are kept as empty strings,
/// never dropped, so ordinals stay aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedText {
    /// The whole document as one string (units joined by a blank line).
    Whole(String),
    /// One string per page/chapter, in source order.
    PerUnit(Vec<String>),
}

impl NormalizedText {
    /// The text as a single string, joining per-unit sequences with a blank
    /// line (the same join the whole-document extraction uses).
    pub fn joined(&self) -> String {
        match self {
            NormalizedText::Whole(text) => text.clone(),
            NormalizedText::PerUnit(units) => units.join("\n\n"),
        }
    }

    /// Per-unit view, if this text was extracted per unit.
    pub fn units(&self) -> Option<&[String]> {
        match self {
            NormalizedText::Whole(_) => None,
            NormalizedText::PerUnit(units) => Some(units),
        }
    }
}

/// The outcome of converting one document.
///
/// Produced by the orchestrator, consumed exactly once by a renderer, not
/// retained after the corresponding payload is persisted.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The source document.
    pub descriptor: DocumentDescriptor,
    /// Normalized text (whole or per-unit, depending on the merge mode).
    pub text: NormalizedText,
    /// The format this result will be rendered to.
    pub format: OutputFormat,
    /// Unit count reported by the extraction source.
    pub unit_count: usize,
    /// Units that failed and were replaced by empty placeholders.
    pub unit_errors: Vec<UnitError>,
}

impl ConversionResult {
    /// The attribution name renderers tag payloads with.
    pub fn source_name(&self) -> String {
        self.descriptor.file_name()
    }
}

/// An ordered group of conversion results destined for one combined output.
/// Order equals selection order, never filesystem order.
pub type MergeBatch = Vec<ConversionResult>;

/// One recorded failure, keyed by the document it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    pub path: PathBuf,
    pub reason: String,
}

/// Counts and failure details for one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Documents converted and rendered.
    pub documents_succeeded: usize,
    /// Documents skipped (unsupported type, no engine for their kind).
    pub documents_skipped: usize,
    /// Documents that failed outright (unreadable source).
    pub documents_failed: usize,
    /// Extraction units produced across all documents (including empty
    /// placeholders for failed units).
    pub units_extracted: usize,
    /// Units replaced by empty placeholders due to a recorded failure.
    pub units_failed: usize,
    /// Output files written.
    pub outputs_written: usize,
    /// Output writes that failed (recorded, remaining writes continued).
    pub writes_failed: usize,
    /// Wall-clock duration of the run in milliseconds.
    pub total_duration_ms: u64,
    /// Every recorded failure, in occurrence order.
    pub failures: Vec<FailureRecord>,
}

impl RunSummary {
    /// Number of documents the run was asked to process.
    pub fn documents_requested(&self) -> usize {
        self.documents_succeeded + self.documents_skipped + self.documents_failed
    }

    /// True when every requested document failed — the only condition under
    /// which a CLI exit status should be non-zero. An empty selection is
    /// "nothing to do", not a failure.
    pub fn is_total_failure(&self) -> bool {
        self.documents_succeeded == 0
            && self.documents_skipped == 0
            && self.documents_failed > 0
    }

    pub(crate) fn record_failure(&mut self, path: PathBuf, reason: String) {
        self.failures.push(FailureRecord { path, reason });
    }
}
