//! Configuration types for batch document conversion.
//!
//! All behaviour is controlled through [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across a run, log it, and diff two runs to
//! understand why their outputs differ. The builder lets callers set only
//! what they care about and rely on documented defaults for the rest.

use crate::document::FormatRegistry;
use crate::error::Doc2TextError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Output formats the renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Plain text, exactly the normalized content.
    #[default]
    Plain,
    /// Markdown with a `# source:` heading naming the originating file.
    Markdown,
    /// Pretty-printed JSON records `{source, content}`.
    Json,
}

impl OutputFormat {
    /// File extension for persisted payloads of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    // Mirrors the persisted extension; used in logs and the CLI summary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the selection maps to output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// One output file per selected document.
    #[default]
    NoMerge,
    /// One combined output file for the whole selection, in selection order.
    Merge,
    /// One output file per page/chapter per document.
    PerUnit,
}

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2text::{ConversionConfig, MergeMode, OutputFormat};
///
/// let config = ConversionConfig::builder()
///     .format(OutputFormat::Markdown)
///     .merge(MergeMode::Merge)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Output format. Default: [`OutputFormat::Plain`].
    pub format: OutputFormat,

    /// Merge mode. Default: [`MergeMode::NoMerge`].
    pub merge: MergeMode,

    /// Directory outputs are written to. `None` (default) writes next to each
    /// source file (merged output next to the first selected source).
    pub output_dir: Option<PathBuf>,

    /// Basename of the combined output in [`MergeMode::Merge`].
    /// Default: `"merged_output"`.
    pub merged_basename: String,

    /// Whether empty pages fall back to the recognition path. Default: true.
    ///
    /// With this off (or with no recognizer configured), a page whose text
    /// layer is empty stays empty — useful when OCR models are unavailable
    /// and silently-empty pages are preferable to a hard dependency.
    pub ocr_fallback: bool,

    /// A page whose trimmed text layer has this many non-whitespace
    /// characters or fewer is treated as image-only and falls back to
    /// recognition. Default: 0 — only whitespace-only pages fall back.
    ///
    /// Raise this for scanned documents whose text layer contains stray
    /// artefacts (page numbers, watermark fragments) that would otherwise
    /// mask a fully scanned page. Leave at 0 for documents with sparse but
    /// legitimate text (title pages, single-word pages).
    pub fallback_min_chars: usize,

    /// Extension→kind registry consulted during discovery and conversion.
    pub registry: FormatRegistry,

    /// Optional progress callback for batch events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            merge: MergeMode::default(),
            output_dir: None,
            merged_basename: "merged_output".to_string(),
            ocr_fallback: true,
            fallback_min_chars: 0,
            registry: FormatRegistry::with_defaults(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("format", &self.format)
            .field("merge", &self.merge)
            .field("output_dir", &self.output_dir)
            .field("merged_basename", &self.merged_basename)
            .field("ocr_fallback", &self.ocr_fallback)
            .field("fallback_min_chars", &self.fallback_min_chars)
            .field("registry", &self.registry)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn merge(mut self, merge: MergeMode) -> Self {
        self.config.merge = merge;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn merged_basename(mut self, name: impl Into<String>) -> Self {
        self.config.merged_basename = name.into();
        self
    }

    pub fn ocr_fallback(mut self, enabled: bool) -> Self {
        self.config.ocr_fallback = enabled;
        self
    }

    pub fn fallback_min_chars(mut self, chars: usize) -> Self {
        self.config.fallback_min_chars = chars;
        self
    }

    pub fn registry(mut self, registry: FormatRegistry) -> Self {
        self.config.registry = registry;
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Doc2TextError> {
        let c = &self.config;
        if c.merged_basename.trim().is_empty() {
            return Err(Doc2TextError::InvalidConfig(
                "merged basename must not be empty".into(),
            ));
        }
        if c.merged_basename.contains(std::path::is_separator) {
            return Err(Doc2TextError::InvalidConfig(format!(
                "merged basename must not contain path separators, got '{}'",
                c.merged_basename
            )));
        }
        Ok(self.config)
    }
}
