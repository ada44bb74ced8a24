//! Progress-callback trait for batch conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the orchestrator walks the selection. The callback approach is
//! the least-invasive integration point: callers can forward events to a
//! terminal progress bar, a log, or a UI without the library knowing how the
//! host application communicates.
//!
//! Documents are processed strictly sequentially, but the trait is still
//! `Send + Sync` so one callback instance can be shared with other threads of
//! the host application.

use std::sync::Arc;

/// Called by the orchestrator as it processes each document and unit.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Indices are 0-based; unit ordinals are 1-based,
/// matching output file naming.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before any document is converted.
    fn on_run_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called just before a document's engine is opened.
    fn on_document_start(&self, index: usize, total_documents: usize, name: &str) {
        let _ = (index, total_documents, name);
    }

    /// Called after each extraction unit (page/chapter) is produced,
    /// whichever extraction path produced it.
    fn on_unit_complete(&self, index: usize, unit: usize, total_units: usize) {
        let _ = (index, unit, total_units);
    }

    /// Called when a document converts successfully.
    fn on_document_complete(&self, index: usize, total_documents: usize, units: usize) {
        let _ = (index, total_documents, units);
    }

    /// Called when a document is skipped or fails.
    fn on_document_error(&self, index: usize, total_documents: usize, error: String) {
        let _ = (index, total_documents, error);
    }

    /// Called once after every document has been attempted.
    fn on_run_complete(&self, total_documents: usize, succeeded: usize) {
        let _ = (total_documents, succeeded);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in
/// [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
