//! # doc2text
//!
//! Convert PDF and EPUB documents to plain text, Markdown, or JSON.
//!
//! ## Why this crate?
//!
//! Document collections are rarely uniform: a folder of "PDFs" usually mixes
//! born-digital files with scans, and e-books ship as markup containers. This
//! crate extracts them all through one pipeline. Digital pages use the
//! document's text layer directly; pages with no usable text are rasterised
//! and handed to an image-recognition engine instead — decided independently
//! per page, so mixed documents come out whole.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input path
//!  │
//!  ├─ 1. Discover  scan for supported documents (registry-filtered)
//!  ├─ 2. Select    caller narrows to an ordered subset
//!  ├─ 3. Convert   per document: text layer, OCR fallback, markup strip
//!  ├─ 4. Render    plain | markdown | json, single | merged | per-unit
//!  ├─ 5. Persist   collision-safe destinations, recorded write failures
//!  └─ 6. Summary   succeeded / skipped / failed, per-path reasons
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2text::{convert_path, ConversionConfig, EngineSet, MergeMode, OutputFormat};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .format(OutputFormat::Markdown)
//!         .merge(MergeMode::NoMerge)
//!         .build()?;
//!
//!     let engines = EngineSet::new()
//!         .with_paginated(doc2text::PdfiumOpener::new())
//!         .with_chaptered(doc2text::EpubOpener::new());
//!
//!     let summary = convert_path(Path::new("./documents"), &config, &engines)?;
//!     eprintln!(
//!         "{}/{} documents converted",
//!         summary.documents_succeeded,
//!         summary.documents_requested()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | The `doc2text` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `pdfium` | on      | Default paginated engine via the system pdfium library |
//! | `epub`   | on      | Default chaptered engine via the `epub` crate |
//! | `ocr`    | off     | ocrs/rten text recognizer for the scanned-page fallback |
//!
//! Engines are ordinary trait implementations: disable the defaults and pass
//! your own [`PaginatedOpener`] / [`ChapteredOpener`] / [`TextRecognizer`]
//! into the [`EngineSet`] — tests do exactly that with deterministic stubs.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod source;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, MergeMode, OutputFormat};
pub use convert::{convert_document, convert_path, discover, run};
pub use document::{DocumentDescriptor, DocumentKind, FormatRegistry};
pub use error::{Doc2TextError, EngineError, UnitError};
pub use output::{ConversionResult, FailureRecord, MergeBatch, NormalizedText, RunSummary};
pub use pipeline::render::{render_merged, render_per_unit, render_single, DocumentRecord, UnitRecord};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use source::{
    ChapteredOpener, ChapteredSource, ContentUnit, EngineSet, PaginatedOpener, PaginatedSource,
    TextRecognizer, UnitKind,
};

#[cfg(feature = "epub")]
pub use source::EpubOpener;
#[cfg(feature = "ocr")]
pub use source::OcrsRecognizer;
#[cfg(feature = "pdfium")]
pub use source::PdfiumOpener;
