//! Input discovery: resolve a user-supplied path to document descriptors.
//!
//! A single file becomes a one-element batch (even if its extension is
//! unknown — the orchestrator reports it as unsupported rather than failing
//! discovery). A directory is scanned non-recursively and filtered through
//! the registry, in directory iteration order, with sizes captured for
//! selection listings. Only a missing or unreadable input path is fatal to
//! the whole run.

use crate::document::{DocumentDescriptor, FormatRegistry};
use crate::error::Doc2TextError;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Resolve `input` to an ordered list of document descriptors.
pub fn discover(
    input: &Path,
    registry: &FormatRegistry,
) -> Result<Vec<DocumentDescriptor>, Doc2TextError> {
    if !input.exists() {
        return Err(Doc2TextError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    if input.is_dir() {
        scan_directory(input, registry)
    } else {
        let size = fs::metadata(input).map(|m| m.len()).unwrap_or(0);
        let kind = registry.kind_for(input);
        debug!("single-file input {} ({:?})", input.display(), kind);
        Ok(vec![DocumentDescriptor::new(input, size, kind)])
    }
}

fn scan_directory(
    dir: &Path,
    registry: &FormatRegistry,
) -> Result<Vec<DocumentDescriptor>, Doc2TextError> {
    let entries = fs::read_dir(dir).map_err(|e| scan_error(dir, e))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| scan_error(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(kind) = registry.kind_for(&path) else {
            continue;
        };
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        documents.push(DocumentDescriptor::new(path, size, Some(kind)));
    }

    info!(
        "discovered {} supported documents in {}",
        documents.len(),
        dir.display()
    );
    Ok(documents)
}

fn scan_error(dir: &Path, e: io::Error) -> Doc2TextError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        Doc2TextError::PermissionDenied {
            path: dir.to_path_buf(),
        }
    } else {
        Doc2TextError::ScanFailed {
            path: dir.to_path_buf(),
            source: e,
        }
    }
}
