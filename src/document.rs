//! Document descriptors and the extension registry.
//!
//! A [`DocumentDescriptor`] is the immutable record the rest of the pipeline
//! passes around instead of bare paths: absolute path, byte size (captured at
//! discovery time for selection listings), and the declared document kind.
//!
//! The [`FormatRegistry`] is deliberately plain data owned by the
//! configuration — an explicit extension→kind map, not a process-wide lookup —
//! so tests and embedders can register their own extensions without touching
//! global state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The two families of source documents the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Page-addressed documents (PDF-like): per-page text layer plus a
    /// per-page raster fallback.
    Paginated,
    /// Chapter-addressed containers (EPUB-like): ordered content units of
    /// raw markup.
    Chaptered,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Paginated => f.write_str("paginated"),
            DocumentKind::Chaptered => f.write_str("chaptered"),
        }
    }
}

/// Immutable metadata for one source file, created at discovery time.
///
/// `kind` is `None` when the file's extension is not in the registry; the
/// orchestrator turns that into an `UnsupportedDocumentType` record at
/// conversion time rather than failing discovery.
#[derive(Debug, Clone)]
pub struct DocumentDescriptor {
    /// Path to the source file.
    pub path: PathBuf,
    /// Size in bytes, captured when the descriptor was created.
    pub size_bytes: u64,
    /// Declared document kind, if the extension was recognised.
    pub kind: Option<DocumentKind>,
}

impl DocumentDescriptor {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64, kind: Option<DocumentKind>) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            kind,
        }
    }

    /// File name component, lossily converted for display and attribution.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// File name without its extension; the base of every derived output name.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name())
    }

    /// Lower-cased extension, or an empty string.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Human-readable size for selection listings: `512B`, `2.4KB`, `1.2MB`…
    pub fn formatted_size(&self) -> String {
        let mut size = self.size_bytes as f64;
        for unit in ["B", "KB", "MB", "GB"] {
            if size < 1024.0 {
                return if unit == "B" {
                    format!("{}{}", self.size_bytes, unit)
                } else {
                    format!("{size:.1}{unit}")
                };
            }
            size /= 1024.0;
        }
        format!("{size:.1}TB")
    }
}

/// Explicit extension→kind map consulted during discovery and conversion.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    map: HashMap<String, DocumentKind>,
}

impl FormatRegistry {
    /// An empty registry; every file is unsupported until registered.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The stock registry: `pdf` → paginated, `epub` → chaptered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("pdf", DocumentKind::Paginated);
        registry.register("epub", DocumentKind::Chaptered);
        registry
    }

    /// Register (or override) an extension. Case-insensitive, no leading dot.
    pub fn register(&mut self, extension: &str, kind: DocumentKind) {
        self.map
            .insert(extension.trim_start_matches('.').to_lowercase(), kind);
    }

    /// Kind for a path, by its lower-cased extension.
    pub fn kind_for(&self, path: &Path) -> Option<DocumentKind> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        self.map.get(&ext).copied()
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        self.kind_for(path).is_some()
    }

    /// Registered extensions, sorted — for help text and error messages.
    pub fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = self.map.keys().cloned().collect();
        exts.sort();
        exts
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_size_units() {
        let d = |bytes| DocumentDescriptor::new("/data/a.pdf", bytes, Some(DocumentKind::Paginated));
        assert_eq!(d(512).formatted_size(), "512B");
        assert_eq!(d(2458).formatted_size(), "2.4KB");
        assert_eq!(d(1_258_291).formatted_size(), "1.2MB");
        assert_eq!(d(3_435_973_837).formatted_size(), "3.2GB");
    }

    #[test]
    fn stem_and_extension() {
        let d = DocumentDescriptor::new("/data/Report.PDF", 1, Some(DocumentKind::Paginated));
        assert_eq!(d.stem(), "Report");
        assert_eq!(d.extension(), "pdf");
        assert_eq!(d.file_name(), "Report.PDF");
    }

    #[test]
    fn registry_defaults_and_case() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(
            registry.kind_for(Path::new("/x/book.EPUB")),
            Some(DocumentKind::Chaptered)
        );
        assert_eq!(
            registry.kind_for(Path::new("/x/a.pdf")),
            Some(DocumentKind::Paginated)
        );
        assert_eq!(registry.kind_for(Path::new("/x/notes.txt")), None);
        assert_eq!(registry.kind_for(Path::new("/x/noext")), None);
    }

    #[test]
    fn registry_register_custom() {
        let mut registry = FormatRegistry::empty();
        assert!(!registry.is_supported(Path::new("a.fb2")));
        registry.register(".FB2", DocumentKind::Chaptered);
        assert!(registry.is_supported(Path::new("a.fb2")));
        assert_eq!(registry.extensions(), vec!["fb2".to_string()]);
    }
}
