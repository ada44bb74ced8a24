//! Default chaptered engine: EPUB containers via the `epub` crate.
//!
//! Units follow the spine (the container's declared reading order), not the
//! resource map, so output order matches what a reader would see. Each spine
//! entry is classified: XHTML resources are content, the navigation document
//! and NCX are navigation, anything else is passed through as `Other` for the
//! converter to skip.

use crate::error::EngineError;
use crate::source::{ChapteredOpener, ChapteredSource, ContentUnit, UnitKind};
use epub::doc::EpubDoc;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Opens EPUB containers.
pub struct EpubOpener;

impl EpubOpener {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EpubOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl ChapteredOpener for EpubOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn ChapteredSource>, EngineError> {
        let doc = EpubDoc::new(path).map_err(|e| EngineError::Open(e.to_string()))?;
        debug!(
            "epub opened {}: {} spine entries",
            path.display(),
            doc.spine.len()
        );
        Ok(Box::new(EpubChapters { doc }))
    }
}

struct EpubChapters {
    doc: EpubDoc<BufReader<File>>,
}

impl ChapteredSource for EpubChapters {
    fn content_units(&mut self) -> Result<Vec<ContentUnit>, EngineError> {
        let spine = self.doc.spine.clone();
        let mut units = Vec::with_capacity(spine.len());

        for item in &spine {
            let idref = &item.idref;
            let Some((markup, mime)) = self.doc.get_resource_str(idref) else {
                debug!("spine entry '{idref}' has no resource, skipping");
                continue;
            };
            units.push(ContentUnit {
                kind: classify(idref, &mime),
                markup,
            });
        }

        Ok(units)
    }
}

fn classify(idref: &str, mime: &str) -> UnitKind {
    let id = idref.to_lowercase();
    if id == "nav" || id == "toc" || id == "ncx" || mime.contains("dtbncx") {
        UnitKind::Navigation
    } else if mime.contains("html") {
        UnitKind::Content
    } else {
        UnitKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_spine_entries() {
        assert_eq!(
            classify("chapter01", "application/xhtml+xml"),
            UnitKind::Content
        );
        assert_eq!(classify("nav", "application/xhtml+xml"), UnitKind::Navigation);
        assert_eq!(
            classify("ncx", "application/x-dtbncx+xml"),
            UnitKind::Navigation
        );
        assert_eq!(classify("cover-image", "image/jpeg"), UnitKind::Other);
    }
}
