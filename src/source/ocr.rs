//! Optional text recognizer: ocrs neural models via `rten`.
//!
//! The engine needs two model files, `text-detection.rten` and
//! `text-recognition.rten`, cached under `$XDG_CACHE_HOME/ocrs` (typically
//! `~/.cache/ocrs`). Running `ocrs-cli` once downloads them. Model loading is
//! the expensive step — construct one recognizer and reuse it for every page
//! in the run.
//!
//! Note: `ocrs` and `rten` must be compiled in release mode; debug builds are
//! orders of magnitude slower.

use crate::error::EngineError;
use crate::source::TextRecognizer;
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DETECTION_MODEL: &str = "text-detection.rten";
const RECOGNITION_MODEL: &str = "text-recognition.rten";

fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// ocrs-backed implementation of [`TextRecognizer`].
pub struct OcrsRecognizer {
    engine: OcrEngine,
}

impl OcrsRecognizer {
    /// Load models from a specific directory containing
    /// `text-detection.rten` and `text-recognition.rten`.
    pub fn from_model_dir(dir: impl AsRef<Path>) -> Result<Self, EngineError> {
        let dir = dir.as_ref();
        Self::from_paths(dir.join(DETECTION_MODEL), dir.join(RECOGNITION_MODEL))
    }

    /// Load models from the default cache directory.
    pub fn with_defaults() -> Result<Self, EngineError> {
        Self::from_model_dir(default_model_dir())
    }

    /// Load models from two explicit files.
    pub fn from_paths(
        detection_model: impl AsRef<Path>,
        recognition_model: impl AsRef<Path>,
    ) -> Result<Self, EngineError> {
        let detection_model = detection_model.as_ref();
        let recognition_model = recognition_model.as_ref();

        for path in [detection_model, recognition_model] {
            if !path.exists() {
                return Err(EngineError::Recognition(format!(
                    "model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }

        info!("loading OCR models");
        let detection = Model::load_file(detection_model).map_err(|e| {
            EngineError::Recognition(format!(
                "failed to load detection model from {}: {e}",
                detection_model.display()
            ))
        })?;
        let recognition = Model::load_file(recognition_model).map_err(|e| {
            EngineError::Recognition(format!(
                "failed to load recognition model from {}: {e}",
                recognition_model.display()
            ))
        })?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection),
            recognition_model: Some(recognition),
            ..Default::default()
        })
        .map_err(|e| EngineError::Recognition(format!("failed to initialise OCR engine: {e}")))?;

        Ok(Self { engine })
    }

    /// Whether both model files exist in the default cache location.
    pub fn models_available() -> bool {
        let dir = default_model_dir();
        dir.join(DETECTION_MODEL).exists() && dir.join(RECOGNITION_MODEL).exists()
    }

    /// The default model directory, for diagnostics and help text.
    pub fn model_directory() -> PathBuf {
        default_model_dir()
    }
}

impl TextRecognizer for OcrsRecognizer {
    fn recognize_text(&self, image: &DynamicImage) -> Result<String, EngineError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|e| {
            EngineError::Recognition(format!("failed to create image source ({width}x{height}): {e}"))
        })?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|e| EngineError::Recognition(format!("OCR preprocessing failed: {e}")))?;
        let text = self
            .engine
            .get_text(&input)
            .map_err(|e| EngineError::Recognition(format!("OCR recognition failed: {e}")))?;

        debug!(
            lines = text.lines().count(),
            chars = text.len(),
            "OCR recognition complete"
        );
        Ok(text)
    }
}
