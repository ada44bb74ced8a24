//! The converter: bound capability interface in, normalized text out.
//!
//! Two closed variants, dispatched by document kind:
//!
//! * **Paginated** — runs the dual-engine policy per page: direct text
//!   extraction first, image-recognition fallback only when the page yields
//!   no usable text. The decision is made independently per page (a document
//!   may mix digital and scanned pages), and a failure on one page's
//!   fallback path never fails the document — the unit is recorded and
//!   replaced by an empty placeholder so page order and count are preserved.
//!
//! * **Chaptered** — iterates the container's units in reading order, keeps
//!   only document-content units, and strips their markup.
//!
//! Both variants return an [`Extraction`]: the ordered unit texts plus any
//! recorded unit errors. Callers decide whether to keep the sequence
//! (per-unit mode) or join it with blank lines (whole-document mode).

use crate::error::{EngineError, UnitError};
use crate::pipeline::strip;
use crate::source::{ChapteredSource, PaginatedSource, TextRecognizer, UnitKind};
use tracing::{debug, warn};

/// Ordered unit texts plus recorded per-unit failures.
pub struct Extraction {
    /// One entry per extraction unit, in source order. Failed units are
    /// empty strings — never dropped.
    pub units: Vec<String>,
    /// Failures recorded while extracting, in occurrence order.
    pub errors: Vec<UnitError>,
}

/// Whether a page's direct text passes the fallback threshold.
fn is_usable(text: &str, fallback_min_chars: usize) -> bool {
    text.chars().filter(|c| !c.is_whitespace()).count() > fallback_min_chars
}

/// Extract a paginated document with the per-page dual-engine policy.
///
/// `recognizer` is `None` when the fallback is disabled or no recognition
/// engine is configured; empty pages then stay empty (logged, not recorded
/// as failures), while pages whose text layer *errored* are recorded.
///
/// `on_unit` fires after each page with `(ordinal, page_count)`.
pub fn extract_paginated(
    source: &mut dyn PaginatedSource,
    recognizer: Option<&dyn TextRecognizer>,
    fallback_min_chars: usize,
    mut on_unit: impl FnMut(usize, usize),
) -> Extraction {
    let page_count = source.page_count();
    let mut units = Vec::with_capacity(page_count);
    let mut errors = Vec::new();

    for index in 0..page_count {
        let ordinal = index + 1;
        let direct = source.page_text(index);

        let text = match direct {
            Ok(text) if is_usable(&text, fallback_min_chars) => text.trim().to_string(),
            direct => {
                // Image-only page (or unreadable text layer): fall back.
                let direct_error = direct.err();
                match recognizer {
                    Some(recognizer) => {
                        recognize_page(source, recognizer, index, ordinal, &mut errors)
                    }
                    None => {
                        if let Some(e) = direct_error {
                            errors.push(UnitError::TextExtraction {
                                ordinal,
                                detail: e.to_string(),
                            });
                        } else {
                            warn!("page {ordinal} has no text layer and no recognizer is configured");
                        }
                        String::new()
                    }
                }
            }
        };

        units.push(text);
        on_unit(ordinal, page_count);
    }

    debug!(
        pages = page_count,
        failed = errors.len(),
        "paginated extraction complete"
    );
    Extraction { units, errors }
}

/// Run one page through the recognition path, recording any failure.
fn recognize_page(
    source: &mut dyn PaginatedSource,
    recognizer: &dyn TextRecognizer,
    index: usize,
    ordinal: usize,
    errors: &mut Vec<UnitError>,
) -> String {
    let image = match source.page_image(index) {
        Ok(image) => image,
        Err(e) => {
            warn!("page {ordinal}: render failed — {e}");
            errors.push(UnitError::ImageRender {
                ordinal,
                detail: e.to_string(),
            });
            return String::new();
        }
    };

    match recognizer.recognize_text(&image) {
        Ok(text) => {
            debug!("page {ordinal}: recognition produced {} chars", text.len());
            text.trim().to_string()
        }
        Err(e) => {
            warn!("page {ordinal}: recognition failed — {e}");
            errors.push(UnitError::Recognition {
                ordinal,
                detail: e.to_string(),
            });
            String::new()
        }
    }
}

/// Extract a chaptered container: content units only, markup stripped.
///
/// Returns `Err` only when the container itself cannot enumerate its units
/// (the caller maps this to an unreadable-document failure).
pub fn extract_chaptered(
    source: &mut dyn ChapteredSource,
    mut on_unit: impl FnMut(usize, usize),
) -> Result<Extraction, EngineError> {
    let all_units = source.content_units()?;
    let content: Vec<_> = all_units
        .into_iter()
        .filter(|unit| unit.kind == UnitKind::Content)
        .collect();

    let total = content.len();
    let mut units = Vec::with_capacity(total);
    for (index, unit) in content.into_iter().enumerate() {
        units.push(strip::strip_markup(&unit.markup));
        on_unit(index + 1, total);
    }

    debug!(units = total, "chaptered extraction complete");
    Ok(Extraction {
        units,
        errors: Vec::new(),
    })
}
