//! Destination derivation and payload writes.
//!
//! Output names derive from the source file stem plus the format extension;
//! per-unit outputs append a zero-padded ordinal, merged output uses the
//! configured fixed basename. The [`DestinationPlanner`] tracks every path
//! claimed during a run so that two selected documents sharing a stem get
//! numeric suffixes instead of silently overwriting each other.

use crate::error::Doc2TextError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Claims collision-free destination paths for one run.
#[derive(Debug, Default)]
pub struct DestinationPlanner {
    used: HashSet<PathBuf>,
}

impl DestinationPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `<dir>/<stem>.<extension>`, appending `_2`, `_3`, … to the stem
    /// if an earlier claim in this run already took the path.
    pub fn claim(&mut self, dir: &Path, stem: &str, extension: &str) -> PathBuf {
        let mut candidate = dir.join(format!("{stem}.{extension}"));
        let mut suffix = 2;
        while self.used.contains(&candidate) {
            candidate = dir.join(format!("{stem}_{suffix}.{extension}"));
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Stem for one per-unit output file: `<stem>_page_<ordinal>`, with the
/// ordinal zero-padded to the width of the document's unit count so
/// lexicographic order equals unit order.
pub fn unit_stem(stem: &str, ordinal: usize, total_units: usize) -> String {
    let width = total_units.max(1).to_string().len();
    format!("{stem}_page_{ordinal:0width$}")
}

/// Write one payload. POSIX overwrite semantics; no atomic rename required.
pub fn write_payload(path: &Path, payload: &str) -> Result<(), Doc2TextError> {
    fs::write(path, payload).map_err(|e| Doc2TextError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("wrote {} ({} bytes)", path.display(), payload.len());
    Ok(())
}
