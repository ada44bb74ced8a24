//! Extraction capability contracts.
//!
//! The core never parses a PDF or unzips an EPUB itself. It asks an engine
//! through one of the traits below, and engines are injected at call time —
//! constructor or function argument, never a global registry — so tests can
//! substitute deterministic stubs and count calls.
//!
//! Three capabilities exist:
//!
//! * [`PaginatedSource`] — page count, per-page text layer, per-page raster.
//! * [`ChapteredSource`] — ordered content units of raw markup.
//! * [`TextRecognizer`] — raster image → text (the OCR side of the dual-engine
//!   fallback policy).
//!
//! Sources are produced by per-kind *openers* so that each document's engine
//! handle is opened, used, and released before the next document starts —
//! no engine state leaks across documents.

use crate::error::EngineError;
use image::DynamicImage;
use std::path::Path;

#[cfg(feature = "epub")]
mod epub;
#[cfg(feature = "ocr")]
mod ocr;
#[cfg(feature = "pdfium")]
mod pdfium;

#[cfg(feature = "epub")]
pub use self::epub::EpubOpener;
#[cfg(feature = "ocr")]
pub use self::ocr::OcrsRecognizer;
#[cfg(feature = "pdfium")]
pub use self::pdfium::PdfiumOpener;

/// What a chaptered container says a unit is.
///
/// Only [`UnitKind::Content`] units are extracted; navigation and metadata
/// units are skipped by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Document content (a chapter body).
    Content,
    /// Navigation apparatus (table of contents, landmarks).
    Navigation,
    /// Container metadata.
    Metadata,
    /// Anything else the container exposes.
    Other,
}

/// One unit yielded by a chaptered container: its declared kind and raw markup.
#[derive(Debug, Clone)]
pub struct ContentUnit {
    pub kind: UnitKind,
    pub markup: String,
}

/// A bound page-addressed document.
pub trait PaginatedSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Text layer of the page at `index` (0-based). May legitimately be
    /// empty for scanned pages.
    fn page_text(&mut self, index: usize) -> Result<String, EngineError>;

    /// Raster image of the page at `index`, for the recognition fallback.
    fn page_image(&mut self, index: usize) -> Result<DynamicImage, EngineError>;
}

/// A bound chapter-addressed container.
pub trait ChapteredSource {
    /// All units the container exposes, in reading order.
    fn content_units(&mut self) -> Result<Vec<ContentUnit>, EngineError>;
}

/// Image-to-text recognition.
pub trait TextRecognizer {
    fn recognize_text(&self, image: &DynamicImage) -> Result<String, EngineError>;
}

/// Opens paginated documents. One `open` per document per run.
pub trait PaginatedOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn PaginatedSource>, EngineError>;
}

/// Opens chaptered containers. One `open` per document per run.
pub trait ChapteredOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn ChapteredSource>, EngineError>;
}

/// The engine bundle the orchestrator binds per document.
///
/// Every field is optional: a selection that never touches a kind does not
/// need its engine, and a missing recognizer merely disables the OCR
/// fallback (empty pages stay empty).
#[derive(Default)]
pub struct EngineSet {
    pub paginated: Option<Box<dyn PaginatedOpener>>,
    pub chaptered: Option<Box<dyn ChapteredOpener>>,
    pub recognizer: Option<Box<dyn TextRecognizer>>,
}

impl EngineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paginated(mut self, opener: impl PaginatedOpener + 'static) -> Self {
        self.paginated = Some(Box::new(opener));
        self
    }

    pub fn with_chaptered(mut self, opener: impl ChapteredOpener + 'static) -> Self {
        self.chaptered = Some(Box::new(opener));
        self
    }

    pub fn with_recognizer(mut self, recognizer: impl TextRecognizer + 'static) -> Self {
        self.recognizer = Some(Box::new(recognizer));
        self
    }
}
