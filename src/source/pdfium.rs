//! Default paginated engine: pdfium via `pdfium-render`.
//!
//! Text comes from the document's text layer (`page.text().all()`); the
//! raster fallback renders the page through a `PdfRenderConfig` whose longest
//! edge is capped in pixels rather than DPI — page sizes vary wildly, and a
//! poster-sized page at a fixed DPI could exhaust memory. The pdfium binding
//! is process-wide and initialised once; each opened document is still
//! scoped to a single conversion.

use crate::error::EngineError;
use crate::source::{PaginatedOpener, PaginatedSource};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

fn pdfium() -> &'static Pdfium {
    static INSTANCE: OnceLock<Pdfium> = OnceLock::new();
    INSTANCE.get_or_init(Pdfium::default)
}

/// Opens PDF files through the system pdfium library.
pub struct PdfiumOpener {
    password: Option<String>,
    max_render_pixels: u32,
}

impl PdfiumOpener {
    pub fn new() -> Self {
        Self {
            password: None,
            max_render_pixels: 2000,
        }
    }

    /// User password for encrypted documents.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Cap on the longest rendered edge in pixels (minimum 100).
    pub fn with_max_render_pixels(mut self, pixels: u32) -> Self {
        self.max_render_pixels = pixels.max(100);
        self
    }
}

impl Default for PdfiumOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginatedOpener for PdfiumOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn PaginatedSource>, EngineError> {
        // `load_pdf_from_file` ties the password reference to the returned
        // document's lifetime even though pdfium copies it internally; the
        // document must be `'static` to borrow the process-wide pdfium
        // singleton, so hand the loader an owned copy with a `'static` lifetime.
        let password: Option<&'static str> = self
            .password
            .as_deref()
            .map(|p| &*Box::leak(p.to_owned().into_boxed_str()));
        let document = pdfium()
            .load_pdf_from_file(path, password)
            .map_err(|e| {
                let detail = format!("{e:?}");
                if detail.to_lowercase().contains("password") {
                    if self.password.is_some() {
                        EngineError::Open("wrong password".into())
                    } else {
                        EngineError::Open("document is encrypted and requires a password".into())
                    }
                } else {
                    EngineError::Open(detail)
                }
            })?;

        let page_count = document.pages().len() as usize;
        debug!("pdfium opened {}: {} pages", path.display(), page_count);

        let render_config = PdfRenderConfig::new()
            .set_target_width(self.max_render_pixels as i32)
            .set_maximum_height(self.max_render_pixels as i32);

        Ok(Box::new(PdfiumPages {
            document,
            render_config,
        }))
    }
}

struct PdfiumPages {
    document: PdfDocument<'static>,
    render_config: PdfRenderConfig,
}

impl PaginatedSource for PdfiumPages {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&mut self, index: usize) -> Result<String, EngineError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| EngineError::Unit {
                ordinal: index + 1,
                detail: format!("{e:?}"),
            })?;
        let text = page.text().map_err(|e| EngineError::Unit {
            ordinal: index + 1,
            detail: format!("text layer unavailable: {e:?}"),
        })?;
        Ok(text.all())
    }

    fn page_image(&mut self, index: usize) -> Result<DynamicImage, EngineError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| EngineError::Unit {
                ordinal: index + 1,
                detail: format!("{e:?}"),
            })?;
        let bitmap = page
            .render_with_config(&self.render_config)
            .map_err(|e| EngineError::Unit {
                ordinal: index + 1,
                detail: format!("rasterisation failed: {e:?}"),
            })?;
        let image = bitmap.as_image();
        debug!(
            "rendered page {} → {}x{} px",
            index + 1,
            image.width(),
            image.height()
        );
        Ok(image)
    }
}
