//! Error types for the doc2text library.
//!
//! Three distinct error types reflect three distinct failure modes:
//!
//! * [`Doc2TextError`] — **Fatal**: either the whole run cannot proceed
//!   (input path missing) or a single document cannot be converted at all
//!   (unreadable file, unsupported extension, no engine bound for its kind).
//!   Returned as `Err(Doc2TextError)` from the top-level entry points; the
//!   batch orchestrator catches the per-document variants, records them in
//!   the run summary, and moves on to the next document.
//!
//! * [`UnitError`] — **Non-fatal**: a single page or chapter failed (text
//!   layer unreadable, raster failed, recognition failed) but the rest of the
//!   document is fine. Stored inside [`crate::output::ConversionResult`] with
//!   the unit's text replaced by an empty placeholder, so positional
//!   invariants hold and callers can inspect partial success.
//!
//! * [`EngineError`] — the error type extraction engines speak at the
//!   capability boundary. The pipeline maps it into one of the two above
//!   depending on where it occurred.

use std::path::PathBuf;
use thiserror::Error;

use crate::document::DocumentKind;

/// All fatal errors returned by the doc2text library.
///
/// Unit-level failures use [`UnitError`] and are stored in
/// [`crate::output::ConversionResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Doc2TextError {
    // ── Run-fatal errors ──────────────────────────────────────────────────
    /// Input path was not found.
    #[error("input path not found: '{}'\nCheck the path exists and is readable.", .path.display())]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the input.
    #[error("permission denied reading '{}'", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Directory scan failed partway through.
    #[error("failed to scan directory '{}': {source}", .path.display())]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Document-fatal errors (recorded, run continues) ───────────────────
    /// The extraction engine could not open the document.
    #[error("document '{}' cannot be opened: {detail}", .path.display())]
    DocumentUnreadable { path: PathBuf, detail: String },

    /// No converter is registered for the document's extension.
    #[error("unsupported document type '.{extension}' for '{}'", .path.display())]
    UnsupportedDocumentType { path: PathBuf, extension: String },

    /// The document's kind is known but no engine was bound for it.
    #[error("no extraction engine configured for {kind} documents")]
    EngineUnavailable { kind: DocumentKind },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write an output payload to disk.
    #[error("failed to write output file '{}': {source}", .path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Doc2TextError {
    /// True for the per-document variants the orchestrator downgrades to a
    /// *skipped* entry (as opposed to a *failed* one).
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Doc2TextError::UnsupportedDocumentType { .. } | Doc2TextError::EngineUnavailable { .. }
        )
    }
}

/// A non-fatal error for a single extraction unit (page or chapter).
///
/// Stored alongside the unit's empty placeholder text in
/// [`crate::output::ConversionResult`]. The overall document conversion
/// continues past any number of these.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum UnitError {
    /// Direct text extraction failed and no fallback path was available.
    #[error("unit {ordinal}: text extraction failed: {detail}")]
    TextExtraction { ordinal: usize, detail: String },

    /// The page could not be rendered to an image for the recognition path.
    #[error("unit {ordinal}: page render failed: {detail}")]
    ImageRender { ordinal: usize, detail: String },

    /// The recognition engine failed on the rendered page image.
    #[error("unit {ordinal}: text recognition failed: {detail}")]
    Recognition { ordinal: usize, detail: String },
}

impl UnitError {
    /// 1-based ordinal of the unit this error belongs to.
    pub fn ordinal(&self) -> usize {
        match self {
            UnitError::TextExtraction { ordinal, .. }
            | UnitError::ImageRender { ordinal, .. }
            | UnitError::Recognition { ordinal, .. } => *ordinal,
        }
    }
}

/// Errors raised by extraction engines at the capability boundary.
///
/// Engines know nothing about documents-in-a-batch or unit placeholders;
/// they report what went wrong and the pipeline decides severity.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The source file could not be opened or parsed at all.
    #[error("cannot open source: {0}")]
    Open(String),

    /// A single unit could not be produced.
    #[error("unit {ordinal}: {detail}")]
    Unit { ordinal: usize, detail: String },

    /// Image-to-text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}
