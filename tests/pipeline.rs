//! Integration tests for the conversion pipeline.
//!
//! Every test drives the real orchestrator with deterministic stub engines
//! injected through the capability traits — no pdfium, no OCR models, no
//! fixture archives. The stubs count calls so policy tests (text first,
//! recognition only as fallback) can assert on what was *not* invoked.

use doc2text::{
    convert_document, run, ContentUnit, ChapteredOpener, ChapteredSource, ConversionConfig,
    ConversionProgressCallback, DocumentDescriptor, DocumentKind, DocumentRecord, EngineError,
    EngineSet, MergeMode, NormalizedText, OutputFormat, PaginatedOpener, PaginatedSource,
    TextRecognizer, UnitKind,
};
use image::DynamicImage;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Stub engines ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Counters {
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
    ocr_calls: AtomicUsize,
}

#[derive(Clone)]
enum StubPage {
    /// Direct text extraction succeeds with this text.
    Digital(&'static str),
    /// Text layer is empty; recognition is expected to supply the text.
    Scanned,
    /// Text layer errors outright.
    TextError(&'static str),
    /// Text layer empty and rasterisation fails.
    RenderError,
}

struct StubPdfOpener {
    documents: HashMap<PathBuf, Vec<StubPage>>,
    counters: Arc<Counters>,
}

impl PaginatedOpener for StubPdfOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn PaginatedSource>, EngineError> {
        let pages = self
            .documents
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::Open(format!("no such document: {}", path.display())))?;
        Ok(Box::new(StubPages {
            pages,
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct StubPages {
    pages: Vec<StubPage>,
    counters: Arc<Counters>,
}

impl PaginatedSource for StubPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&mut self, index: usize) -> Result<String, EngineError> {
        self.counters.text_calls.fetch_add(1, Ordering::SeqCst);
        match self.pages[index] {
            StubPage::Digital(text) => Ok(text.to_string()),
            StubPage::TextError(detail) => Err(EngineError::Unit {
                ordinal: index + 1,
                detail: detail.to_string(),
            }),
            StubPage::Scanned | StubPage::RenderError => Ok("  \n ".to_string()),
        }
    }

    fn page_image(&mut self, index: usize) -> Result<DynamicImage, EngineError> {
        self.counters.image_calls.fetch_add(1, Ordering::SeqCst);
        match self.pages[index] {
            StubPage::RenderError => Err(EngineError::Unit {
                ordinal: index + 1,
                detail: "bitmap allocation failed".to_string(),
            }),
            _ => Ok(DynamicImage::new_rgb8(2, 2)),
        }
    }
}

struct StubEpubOpener {
    documents: HashMap<PathBuf, Vec<ContentUnit>>,
}

impl ChapteredOpener for StubEpubOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn ChapteredSource>, EngineError> {
        let units = self
            .documents
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::Open(format!("no such container: {}", path.display())))?;
        Ok(Box::new(StubChapters { units }))
    }
}

struct StubChapters {
    units: Vec<ContentUnit>,
}

impl ChapteredSource for StubChapters {
    fn content_units(&mut self) -> Result<Vec<ContentUnit>, EngineError> {
        Ok(self.units.clone())
    }
}

/// Pops scripted replies in order; recognition calls are strictly sequential
/// (documents and pages are processed one at a time), so a FIFO is exact.
struct ScriptedRecognizer {
    replies: Mutex<VecDeque<&'static str>>,
    counters: Arc<Counters>,
}

impl TextRecognizer for ScriptedRecognizer {
    fn recognize_text(&self, _image: &DynamicImage) -> Result<String, EngineError> {
        self.counters.ocr_calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => Ok(reply.to_string()),
            None => Ok(String::new()),
        }
    }
}

// ── Fixture builder ──────────────────────────────────────────────────────────

#[derive(Default)]
struct Fixture {
    pdfs: HashMap<PathBuf, Vec<StubPage>>,
    epubs: HashMap<PathBuf, Vec<ContentUnit>>,
    ocr_replies: VecDeque<&'static str>,
    counters: Arc<Counters>,
}

impl Fixture {
    fn new() -> Self {
        Self::default()
    }

    fn pdf(mut self, path: &str, pages: Vec<StubPage>) -> Self {
        self.pdfs.insert(PathBuf::from(path), pages);
        self
    }

    fn epub(mut self, path: &str, units: Vec<ContentUnit>) -> Self {
        self.epubs.insert(PathBuf::from(path), units);
        self
    }

    fn ocr(mut self, replies: &[&'static str]) -> Self {
        self.ocr_replies = replies.iter().copied().collect();
        self
    }

    fn engines(&self) -> EngineSet {
        EngineSet::new()
            .with_paginated(StubPdfOpener {
                documents: self.pdfs.clone(),
                counters: Arc::clone(&self.counters),
            })
            .with_chaptered(StubEpubOpener {
                documents: self.epubs.clone(),
            })
            .with_recognizer(ScriptedRecognizer {
                replies: Mutex::new(self.ocr_replies.clone()),
                counters: Arc::clone(&self.counters),
            })
    }
}

fn content(markup: &str) -> ContentUnit {
    ContentUnit {
        kind: UnitKind::Content,
        markup: markup.to_string(),
    }
}

fn navigation(markup: &str) -> ContentUnit {
    ContentUnit {
        kind: UnitKind::Navigation,
        markup: markup.to_string(),
    }
}

fn pdf_descriptor(path: &str) -> DocumentDescriptor {
    DocumentDescriptor::new(path, 1024, Some(DocumentKind::Paginated))
}

fn epub_descriptor(path: &str) -> DocumentDescriptor {
    DocumentDescriptor::new(path, 4096, Some(DocumentKind::Chaptered))
}

fn config_in(dir: &TempDir, format: OutputFormat, merge: MergeMode) -> ConversionConfig {
    ConversionConfig::builder()
        .format(format)
        .merge(merge)
        .output_dir(dir.path())
        .build()
        .expect("valid config")
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name))
        .unwrap_or_else(|e| panic!("missing output file {name}: {e}"))
}

// ── Dual-engine policy ───────────────────────────────────────────────────────

#[test]
fn page_count_is_preserved_however_pages_were_extracted() {
    let fixture = Fixture::new()
        .pdf(
            "/docs/mixed.pdf",
            vec![
                StubPage::Digital("page one"),
                StubPage::Scanned,
                StubPage::Digital("page three"),
                StubPage::Scanned,
                StubPage::RenderError,
            ],
        )
        .ocr(&["recognised two", "recognised four"]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::PerUnit);

    let result = convert_document(&pdf_descriptor("/docs/mixed.pdf"), &config, &fixture.engines())
        .expect("conversion succeeds");

    let units = result.text.units().expect("per-unit text");
    assert_eq!(units.len(), 5, "one entry per page, no unit dropped");
    assert_eq!(units[0], "page one");
    assert_eq!(units[1], "recognised two");
    assert_eq!(units[3], "recognised four");
    assert_eq!(units[4], "", "failed page becomes an empty placeholder");
    assert_eq!(result.unit_count, 5);
    assert_eq!(result.unit_errors.len(), 1);
}

#[test]
fn recognition_is_never_invoked_when_direct_text_is_usable() {
    let fixture = Fixture::new().pdf(
        "/docs/digital.pdf",
        vec![
            StubPage::Digital("one"),
            StubPage::Digital("two"),
            StubPage::Digital("three"),
        ],
    );
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::NoMerge);
    let engines = fixture.engines();

    convert_document(&pdf_descriptor("/docs/digital.pdf"), &config, &engines)
        .expect("conversion succeeds");

    assert_eq!(fixture.counters.text_calls.load(Ordering::SeqCst), 3);
    assert_eq!(fixture.counters.image_calls.load(Ordering::SeqCst), 0);
    assert_eq!(fixture.counters.ocr_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn recognition_runs_once_per_blank_page_only() {
    let fixture = Fixture::new()
        .pdf(
            "/docs/mixed.pdf",
            vec![
                StubPage::Digital("one"),
                StubPage::Scanned,
                StubPage::Scanned,
                StubPage::RenderError,
            ],
        )
        .ocr(&["two", "three"]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::NoMerge);
    let engines = fixture.engines();

    convert_document(&pdf_descriptor("/docs/mixed.pdf"), &config, &engines)
        .expect("conversion succeeds");

    // Three blank pages attempt the raster; the failed raster never reaches
    // the recognizer.
    assert_eq!(fixture.counters.image_calls.load(Ordering::SeqCst), 3);
    assert_eq!(fixture.counters.ocr_calls.load(Ordering::SeqCst), 2);
}

// ── Merge ordering ───────────────────────────────────────────────────────────

#[test]
fn merge_concatenates_in_selection_order_not_discovery_order() {
    let fixture = Fixture::new()
        .pdf("/docs/alpha.pdf", vec![StubPage::Digital("alpha body")])
        .pdf("/docs/beta.pdf", vec![StubPage::Digital("beta body")]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::Merge);

    // Selection deliberately reverses name order.
    let selection = vec![
        pdf_descriptor("/docs/beta.pdf"),
        pdf_descriptor("/docs/alpha.pdf"),
    ];
    let summary = run(&selection, &config, &fixture.engines()).expect("run succeeds");

    assert_eq!(summary.outputs_written, 1);
    let merged = read(&out, "merged_output.txt");
    assert_eq!(
        merged,
        "beta body\n\n--- START SOURCE: alpha.pdf ---\n\nalpha body"
    );
}

#[test]
fn removing_a_document_does_not_disturb_other_sections() {
    let fixture = Fixture::new()
        .pdf("/docs/alpha.pdf", vec![StubPage::Digital("alpha body")])
        .pdf("/docs/beta.pdf", vec![StubPage::Digital("beta body")]);

    let out_both = TempDir::new().expect("tempdir");
    let config = config_in(&out_both, OutputFormat::Plain, MergeMode::Merge);
    run(
        &[
            pdf_descriptor("/docs/alpha.pdf"),
            pdf_descriptor("/docs/beta.pdf"),
        ],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");
    let both = read(&out_both, "merged_output.txt");

    let out_one = TempDir::new().expect("tempdir");
    let config = config_in(&out_one, OutputFormat::Plain, MergeMode::Merge);
    run(
        &[pdf_descriptor("/docs/beta.pdf")],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");
    let only_beta = read(&out_one, "merged_output.txt");

    assert!(both.ends_with(&only_beta), "beta's section is byte-identical");
    assert!(both.starts_with("alpha body"));
}

// ── Spec scenarios ───────────────────────────────────────────────────────────

#[test]
fn digital_then_scanned_merged_plain_scenario() {
    let fixture = Fixture::new()
        .pdf(
            "/docs/digital.pdf",
            vec![
                StubPage::Digital("Page one text"),
                StubPage::Digital("Page two text"),
                StubPage::Digital("Page three text"),
            ],
        )
        .pdf(
            "/docs/scanned.pdf",
            vec![StubPage::Scanned, StubPage::Scanned],
        )
        .ocr(&["Scanned one", "Scanned two"]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::Merge);

    let summary = run(
        &[
            pdf_descriptor("/docs/digital.pdf"),
            pdf_descriptor("/docs/scanned.pdf"),
        ],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");

    assert_eq!(summary.documents_succeeded, 2);
    assert_eq!(summary.units_extracted, 5);
    let merged = read(&out, "merged_output.txt");
    assert_eq!(
        merged,
        "Page one text\n\nPage two text\n\nPage three text\
         \n\n--- START SOURCE: scanned.pdf ---\n\n\
         Scanned one\n\nScanned two"
    );
}

#[test]
fn four_chapter_container_per_unit_markdown_scenario() {
    let fixture = Fixture::new().epub(
        "/books/novel.epub",
        vec![
            navigation("<ol><li>Chapter 1</li></ol>"),
            content("<h1>Chapter 1</h1><p>It begins\nacross two source lines.</p>"),
            content("<h1>Chapter 2</h1><p>First paragraph.</p><p>Second paragraph.</p>"),
            content("<h1>Chapter 3</h1><p>More text.</p>"),
            content("<h1>Chapter 4</h1><p>The end.</p>"),
        ],
    );
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Markdown, MergeMode::PerUnit);

    let summary = run(
        &[epub_descriptor("/books/novel.epub")],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");

    assert_eq!(summary.units_extracted, 4, "navigation unit is skipped");
    assert_eq!(summary.outputs_written, 4);

    let first = read(&out, "novel_page_1.md");
    assert_eq!(
        first,
        "# source: novel.epub (page 1)\n\nChapter 1\nIt begins across two source lines."
    );
    let second = read(&out, "novel_page_2.md");
    assert_eq!(
        second,
        "# source: novel.epub (page 2)\n\nChapter 2\nFirst paragraph.\nSecond paragraph."
    );
    assert!(out.path().join("novel_page_3.md").exists());
    assert!(out.path().join("novel_page_4.md").exists());
    assert!(!out.path().join("novel_page_5.md").exists());
}

#[test]
fn unsupported_document_is_skipped_and_run_partially_succeeds() {
    let fixture = Fixture::new()
        .pdf("/docs/good.pdf", vec![StubPage::Digital("fine")])
        .epub("/docs/book.epub", vec![content("<p>also fine</p>")]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::NoMerge);

    let selection = vec![
        pdf_descriptor("/docs/good.pdf"),
        DocumentDescriptor::new("/docs/notes.xyz", 10, None),
        epub_descriptor("/docs/book.epub"),
    ];
    let summary = run(&selection, &config, &fixture.engines()).expect("run succeeds");

    assert_eq!(summary.documents_succeeded, 2);
    assert_eq!(summary.documents_skipped, 1);
    assert_eq!(summary.documents_failed, 0);
    assert_eq!(summary.outputs_written, 2);
    assert!(!summary.is_total_failure());

    let reasons: Vec<&str> = summary.failures.iter().map(|f| f.reason.as_str()).collect();
    assert_eq!(reasons.len(), 1);
    assert!(reasons[0].contains("unsupported document type"), "got: {}", reasons[0]);
    assert_eq!(summary.failures[0].path, PathBuf::from("/docs/notes.xyz"));
}

// ── Per-unit persistence ─────────────────────────────────────────────────────

#[test]
fn per_unit_persistence_has_no_gaps_even_with_failed_units() {
    let fixture = Fixture::new()
        .pdf(
            "/docs/doc.pdf",
            vec![
                StubPage::Digital("one"),
                StubPage::RenderError,
                StubPage::Digital("three"),
                StubPage::Scanned,
            ],
        )
        .ocr(&["four"]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::PerUnit);

    let summary = run(
        &[pdf_descriptor("/docs/doc.pdf")],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");

    assert_eq!(summary.outputs_written, 4);
    assert_eq!(summary.units_failed, 1);
    assert_eq!(read(&out, "doc_page_1.txt"), "one");
    assert_eq!(read(&out, "doc_page_2.txt"), "", "failed unit still gets its file");
    assert_eq!(read(&out, "doc_page_3.txt"), "three");
    assert_eq!(read(&out, "doc_page_4.txt"), "four");
}

#[test]
fn per_unit_ordinals_are_zero_padded_to_unit_count_width() {
    let pages: Vec<StubPage> = (0..12).map(|_| StubPage::Digital("p")).collect();
    let fixture = Fixture::new().pdf("/docs/long.pdf", pages);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::PerUnit);

    run(
        &[pdf_descriptor("/docs/long.pdf")],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");

    assert!(out.path().join("long_page_01.txt").exists());
    assert!(out.path().join("long_page_12.txt").exists());
    assert!(!out.path().join("long_page_1.txt").exists());
}

// ── Round-trip ───────────────────────────────────────────────────────────────

#[test]
fn json_payload_round_trips_attribution_and_content() {
    let fixture = Fixture::new().pdf(
        "/docs/report.pdf",
        vec![StubPage::Digital("line one\nline two"), StubPage::Digital("page 2")],
    );
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Json, MergeMode::NoMerge);

    run(
        &[pdf_descriptor("/docs/report.pdf")],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");

    let payload = read(&out, "report.json");
    let record: DocumentRecord = serde_json::from_str(&payload).expect("valid JSON");
    assert_eq!(record.source, "report.pdf");
    assert_eq!(record.content, "line one\nline two\n\npage 2");
}

// ── Failure policy ───────────────────────────────────────────────────────────

#[test]
fn unreadable_document_fails_alone_and_the_batch_continues() {
    let fixture = Fixture::new().pdf("/docs/good.pdf", vec![StubPage::Digital("fine")]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::NoMerge);

    // broken.pdf has no stub fixture → the opener fails on it.
    let summary = run(
        &[
            pdf_descriptor("/docs/broken.pdf"),
            pdf_descriptor("/docs/good.pdf"),
        ],
        &config,
        &fixture.engines(),
    )
    .expect("run itself still succeeds");

    assert_eq!(summary.documents_failed, 1);
    assert_eq!(summary.documents_succeeded, 1);
    assert!(!summary.is_total_failure());
    assert_eq!(read(&out, "good.txt"), "fine");
    assert!(summary
        .failures
        .iter()
        .any(|f| f.path == PathBuf::from("/docs/broken.pdf")));
}

#[test]
fn all_documents_failing_is_a_total_failure() {
    let fixture = Fixture::new();
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::NoMerge);

    let summary = run(
        &[pdf_descriptor("/docs/a.pdf"), pdf_descriptor("/docs/b.pdf")],
        &config,
        &fixture.engines(),
    )
    .expect("run itself still succeeds");

    assert_eq!(summary.documents_failed, 2);
    assert!(summary.is_total_failure());
    assert_eq!(summary.outputs_written, 0);
}

#[test]
fn empty_selection_is_nothing_to_do() {
    let fixture = Fixture::new();
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::Merge);

    let summary = run(&[], &config, &fixture.engines()).expect("run succeeds");

    assert_eq!(summary.documents_requested(), 0);
    assert_eq!(summary.outputs_written, 0);
    assert!(!summary.is_total_failure());
    assert!(!out.path().join("merged_output.txt").exists(), "no output for empty run");
}

// ── Destination collisions ───────────────────────────────────────────────────

#[test]
fn shared_stems_are_disambiguated_never_overwritten() {
    let fixture = Fixture::new()
        .pdf("/a/report.pdf", vec![StubPage::Digital("from a")])
        .pdf("/b/report.pdf", vec![StubPage::Digital("from b")]);
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::NoMerge);

    let summary = run(
        &[pdf_descriptor("/a/report.pdf"), pdf_descriptor("/b/report.pdf")],
        &config,
        &fixture.engines(),
    )
    .expect("run succeeds");

    assert_eq!(summary.outputs_written, 2);
    assert_eq!(read(&out, "report.txt"), "from a");
    assert_eq!(read(&out, "report_2.txt"), "from b");
}

// ── Whole-document chaptered output ──────────────────────────────────────────

#[test]
fn chaptered_whole_document_joins_units_with_blank_line() {
    let fixture = Fixture::new().epub(
        "/books/two.epub",
        vec![content("<p>Chapter one.</p>"), content("<p>Chapter two.</p>")],
    );
    let out = TempDir::new().expect("tempdir");
    let config = config_in(&out, OutputFormat::Plain, MergeMode::NoMerge);

    let result = convert_document(
        &epub_descriptor("/books/two.epub"),
        &config,
        &fixture.engines(),
    )
    .expect("conversion succeeds");

    assert_eq!(
        result.text,
        NormalizedText::Whole("Chapter one.\n\nChapter two.".to_string())
    );
    assert_eq!(result.unit_count, 2);
}

// ── Progress events ──────────────────────────────────────────────────────────

#[test]
fn progress_callback_sees_every_document_and_unit() {
    #[derive(Default)]
    struct CountingCallback {
        run_started_with: AtomicUsize,
        documents: AtomicUsize,
        units: AtomicUsize,
        errors: AtomicUsize,
        succeeded_at_end: AtomicUsize,
    }

    impl ConversionProgressCallback for CountingCallback {
        fn on_run_start(&self, total_documents: usize) {
            self.run_started_with.store(total_documents, Ordering::SeqCst);
        }
        fn on_unit_complete(&self, _index: usize, _unit: usize, _total_units: usize) {
            self.units.fetch_add(1, Ordering::SeqCst);
        }
        fn on_document_complete(&self, _index: usize, _total: usize, _units: usize) {
            self.documents.fetch_add(1, Ordering::SeqCst);
        }
        fn on_document_error(&self, _index: usize, _total: usize, _error: String) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
        fn on_run_complete(&self, _total_documents: usize, succeeded: usize) {
            self.succeeded_at_end.store(succeeded, Ordering::SeqCst);
        }
    }

    let fixture = Fixture::new()
        .pdf(
            "/docs/two-pager.pdf",
            vec![StubPage::Digital("one"), StubPage::Digital("two")],
        )
        .epub("/books/one-chapter.epub", vec![content("<p>ch</p>")]);
    let out = TempDir::new().expect("tempdir");
    let callback = Arc::new(CountingCallback::default());

    let config = ConversionConfig::builder()
        .format(OutputFormat::Plain)
        .merge(MergeMode::NoMerge)
        .output_dir(out.path())
        .progress_callback(Arc::clone(&callback) as Arc<dyn ConversionProgressCallback>)
        .build()
        .expect("valid config");

    let selection = vec![
        pdf_descriptor("/docs/two-pager.pdf"),
        epub_descriptor("/books/one-chapter.epub"),
        pdf_descriptor("/docs/missing.pdf"),
    ];
    run(&selection, &config, &fixture.engines()).expect("run succeeds");

    assert_eq!(callback.run_started_with.load(Ordering::SeqCst), 3);
    assert_eq!(callback.documents.load(Ordering::SeqCst), 2);
    assert_eq!(callback.units.load(Ordering::SeqCst), 3, "2 pages + 1 chapter");
    assert_eq!(callback.errors.load(Ordering::SeqCst), 1);
    assert_eq!(callback.succeeded_at_end.load(Ordering::SeqCst), 2);
}
