//! CLI binary for doc2text.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, assembles the default engines, and prints the run
//! summary.

use anyhow::{Context, Result};
use clap::Parser;
use doc2text::{
    discover, run, ConversionConfig, ConversionProgressCallback, DocumentDescriptor, EngineSet,
    MergeMode, OutputFormat, ProgressCallback, RunSummary,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar across the selection, per-document
/// log lines as they complete.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Name of the document currently converting, for per-unit messages.
    current: Mutex<String>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            current: Mutex::new(String::new()),
        })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_documents: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>2}/{len} documents  ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total_documents as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Converting");
    }

    fn on_document_start(&self, _index: usize, _total: usize, name: &str) {
        *self.current.lock().unwrap() = name.to_string();
        self.bar.set_message(name.to_string());
    }

    fn on_unit_complete(&self, _index: usize, unit: usize, total_units: usize) {
        let name = self.current.lock().unwrap().clone();
        self.bar
            .set_message(format!("{name} · unit {unit}/{total_units}"));
    }

    fn on_document_complete(&self, index: usize, total: usize, units: usize) {
        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {}  {}",
            green("✓"),
            index + 1,
            total,
            self.current.lock().unwrap(),
            dim(&format!("{units} units")),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, index: usize, total: usize, error: String) {
        let msg = if error.len() > 100 {
            format!("{}…", &error[..99])
        } else {
            error
        };
        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {}  {}",
            red("✗"),
            index + 1,
            total,
            self.current.lock().unwrap(),
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, total_documents: usize, succeeded: usize) {
        let failed = total_documents.saturating_sub(succeeded);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} documents converted successfully",
                green("✔"),
                bold(&succeeded.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} documents converted",
                if succeeded == 0 { red("✘") } else { cyan("⚠") },
                bold(&succeeded.to_string()),
                total_documents,
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every supported document in a directory to plain text
  doc2text ./library

  # One Markdown file per document, written elsewhere
  doc2text ./library --format markdown -o ./out

  # Merge a hand-picked, ordered subset into one file
  doc2text ./library --select 3,1,2 --mode merge --format markdown

  # One JSON file per page/chapter
  doc2text book.epub --mode per-unit --format json

  # See what would be selected (names and sizes), then decide
  doc2text ./library --list

  # Machine-readable run summary
  doc2text ./library --summary-json > summary.json

SUPPORTED INPUTS:
  .pdf    paginated — text layer first, OCR fallback per page (feature "ocr")
  .epub   chaptered — spine-ordered chapters, markup stripped

OCR MODELS (feature "ocr"):
  The scanned-page fallback uses ocrs neural models cached under
  ~/.cache/ocrs/ (text-detection.rten, text-recognition.rten).
  Install once with:  cargo install ocrs-cli && ocrs any-image.png
  Without the models (or with --no-ocr) scanned pages come out empty and are
  noted in the summary.

PDFIUM:
  The PDF engine binds the system pdfium library. Point PDFIUM_LIB_PATH at a
  copy of libpdfium if it is not on the default search path.

EXIT STATUS:
  0  at least one document converted (or nothing to do)
  1  every requested document failed
"#;

/// Convert PDF and EPUB documents to plain text, Markdown, or JSON.
#[derive(Parser, Debug)]
#[command(
    name = "doc2text",
    version,
    about = "Convert PDF and EPUB documents to plain text, Markdown, or JSON",
    long_about = "Extract PDF and EPUB documents into normalized plain text and render it as \
plain text, Markdown, or JSON. Pages without a usable text layer fall back to OCR \
(per page, so mixed digital/scanned documents come out whole). Batches can be merged \
into one output or split per page/chapter.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Source file or directory (directories are scanned non-recursively).
    input: PathBuf,

    /// Directory for output files. Default: next to each source file.
    #[arg(short, long, env = "DOC2TEXT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, env = "DOC2TEXT_FORMAT", value_enum, default_value = "text")]
    format: FormatArg,

    /// Output mode: one file per document, one merged file, or one file per
    /// page/chapter.
    #[arg(short, long, env = "DOC2TEXT_MODE", value_enum, default_value = "single")]
    mode: ModeArg,

    /// Basename of the merged output file (merge mode).
    #[arg(long, env = "DOC2TEXT_MERGED_NAME", default_value = "merged_output")]
    merged_name: String,

    /// Convert only these documents, by 1-based position in the discovery
    /// listing (see --list). Order is preserved and becomes merge order,
    /// e.g. --select 3,1.
    #[arg(long)]
    select: Option<String>,

    /// List discovered documents (position, size, name) and exit.
    #[arg(long)]
    list: bool,

    /// Pages whose text layer has this many non-whitespace characters or
    /// fewer are treated as scanned and fall back to OCR.
    #[arg(long, env = "DOC2TEXT_MIN_TEXT_CHARS", default_value_t = 0)]
    min_text_chars: usize,

    /// Disable the OCR fallback; pages without a text layer come out empty.
    #[arg(long, env = "DOC2TEXT_NO_OCR")]
    no_ocr: bool,

    /// Directory containing the ocrs model files (feature "ocr").
    #[arg(long, env = "DOC2TEXT_OCR_MODELS")]
    ocr_models: Option<PathBuf>,

    /// User password for encrypted PDFs.
    #[arg(long, env = "DOC2TEXT_PDF_PASSWORD")]
    pdf_password: Option<String>,

    /// Print the run summary as JSON to stdout.
    #[arg(long, env = "DOC2TEXT_SUMMARY_JSON")]
    summary_json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "DOC2TEXT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOC2TEXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOC2TEXT_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Markdown,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Text => OutputFormat::Plain,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Single,
    Merge,
    PerUnit,
}

impl From<ModeArg> for MergeMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Single => MergeMode::NoMerge,
            ModeArg::Merge => MergeMode::Merge,
            ModeArg::PerUnit => MergeMode::PerUnit,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active; the
    // bar provides the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.list;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .format(cli.format.into())
        .merge(cli.mode.into())
        .merged_basename(cli.merged_name.as_str())
        .ocr_fallback(!cli.no_ocr)
        .fallback_min_chars(cli.min_text_chars);
    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Discover ─────────────────────────────────────────────────────────
    let discovered = discover(&cli.input, &config.registry).context("Discovery failed")?;

    if cli.list {
        if discovered.is_empty() {
            eprintln!("no supported documents found in {}", cli.input.display());
        }
        for (position, doc) in discovered.iter().enumerate() {
            println!(
                "{:>3}  {:>8}  {}",
                position + 1,
                doc.formatted_size(),
                doc.file_name()
            );
        }
        return Ok(());
    }

    // ── Select ───────────────────────────────────────────────────────────
    let selection = match cli.select {
        Some(ref spec) => parse_selection(spec, &discovered)?,
        None => discovered,
    };
    if selection.is_empty() {
        if !cli.quiet {
            eprintln!("nothing to do: no supported documents selected");
        }
        return Ok(());
    }

    // ── Assemble engines ─────────────────────────────────────────────────
    let engines = build_engines(&cli);

    // ── Run ──────────────────────────────────────────────────────────────
    let summary = run(&selection, &config, &engines).context("Conversion failed")?;

    report(&cli, &summary)?;

    if summary.is_total_failure() {
        anyhow::bail!("all {} documents failed", summary.documents_requested());
    }
    Ok(())
}

/// Assemble the engine set from the compiled-in defaults and CLI flags.
fn build_engines(cli: &Cli) -> EngineSet {
    let mut engines = EngineSet::new();

    #[cfg(feature = "pdfium")]
    {
        let mut opener = doc2text::PdfiumOpener::new();
        if let Some(ref password) = cli.pdf_password {
            opener = opener.with_password(password.as_str());
        }
        engines = engines.with_paginated(opener);
    }
    #[cfg(not(feature = "pdfium"))]
    let _ = &cli.pdf_password;

    #[cfg(feature = "epub")]
    {
        engines = engines.with_chaptered(doc2text::EpubOpener::new());
    }

    #[cfg(feature = "ocr")]
    if !cli.no_ocr {
        let recognizer = match cli.ocr_models {
            Some(ref dir) => doc2text::OcrsRecognizer::from_model_dir(dir),
            None => doc2text::OcrsRecognizer::with_defaults(),
        };
        match recognizer {
            Ok(recognizer) => engines = engines.with_recognizer(recognizer),
            Err(e) => eprintln!(
                "{} OCR unavailable, scanned pages will be empty: {e}",
                cyan("⚠")
            ),
        }
    }
    #[cfg(not(feature = "ocr"))]
    let _ = &cli.ocr_models;

    engines
}

/// Parse `--select 3,1,2` into an ordered selection over the discovery list.
fn parse_selection(
    spec: &str,
    discovered: &[DocumentDescriptor],
) -> Result<Vec<DocumentDescriptor>> {
    let mut selection = Vec::new();
    for token in spec.split(',') {
        let position: usize = token
            .trim()
            .parse()
            .with_context(|| format!("invalid selection index '{}'", token.trim()))?;
        if position < 1 || position > discovered.len() {
            anyhow::bail!(
                "selection index {position} is out of range (1..={})",
                discovered.len()
            );
        }
        selection.push(discovered[position - 1].clone());
    }
    Ok(selection)
}

/// Print the run summary (human or JSON form).
fn report(cli: &Cli, summary: &RunSummary) -> Result<()> {
    if cli.summary_json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).context("Failed to serialise summary")?
        );
        return Ok(());
    }

    if cli.quiet {
        return Ok(());
    }

    eprintln!(
        "   {} succeeded  {} skipped  {} failed  —  {} units, {} outputs, {}ms",
        summary.documents_succeeded,
        summary.documents_skipped,
        summary.documents_failed,
        summary.units_extracted,
        summary.outputs_written,
        summary.total_duration_ms,
    );
    for failure in &summary.failures {
        eprintln!(
            "   {} {}  {}",
            red("•"),
            failure.path.display(),
            dim(&failure.reason)
        );
    }
    io::stderr().flush().ok();
    Ok(())
}
