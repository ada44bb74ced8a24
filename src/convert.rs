//! The conversion orchestrator.
//!
//! One run walks the state machine `DISCOVER → SELECT → CONVERT → RENDER →
//! PERSIST → DONE`. Discovery and selection are inputs here ([`discover`]
//! produces the candidate set; the caller — interactive UI or CLI flags —
//! narrows it to an ordered selection). [`run`] drives the rest, strictly
//! sequentially: document N+1's engine is not opened until document N's
//! result is rendered and persisted, and each bound engine handle is
//! released before the next document starts.
//!
//! Failure policy: per-document and per-unit failures are caught here,
//! downgraded to run-summary records, and never abort the batch. Only a
//! failure during discovery (missing input path) is fatal to the whole run.

use crate::config::{ConversionConfig, MergeMode};
use crate::document::{DocumentDescriptor, DocumentKind};
use crate::error::Doc2TextError;
use crate::output::{ConversionResult, MergeBatch, NormalizedText, RunSummary};
use crate::pipeline::{extract, persist, render};
use crate::source::EngineSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

pub use crate::pipeline::discover::discover;

/// Convert a single document to a [`ConversionResult`].
///
/// This is the per-document core of [`run`], exposed for library callers
/// that manage their own batching. The merge mode in `config` decides
/// whether the text is extracted whole or per unit.
///
/// # Errors
/// Returns the per-document fatal errors: `UnsupportedDocumentType`,
/// `EngineUnavailable`, `DocumentUnreadable`. Per-unit failures do not
/// surface here — they are recorded inside the result.
pub fn convert_document(
    descriptor: &DocumentDescriptor,
    config: &ConversionConfig,
    engines: &EngineSet,
) -> Result<ConversionResult, Doc2TextError> {
    convert_document_inner(descriptor, config, engines, |_, _| {})
}

fn convert_document_inner(
    descriptor: &DocumentDescriptor,
    config: &ConversionConfig,
    engines: &EngineSet,
    on_unit: impl FnMut(usize, usize),
) -> Result<ConversionResult, Doc2TextError> {
    // Resolve the converter by type tag; a missing tag means no converter is
    // registered for this extension.
    let kind = descriptor
        .kind
        .or_else(|| config.registry.kind_for(&descriptor.path))
        .ok_or_else(|| Doc2TextError::UnsupportedDocumentType {
            path: descriptor.path.clone(),
            extension: descriptor.extension(),
        })?;

    debug!("converting {} as {kind}", descriptor.path.display());
    let extraction = match kind {
        DocumentKind::Paginated => {
            let opener = engines
                .paginated
                .as_ref()
                .ok_or(Doc2TextError::EngineUnavailable { kind })?;
            let mut source =
                opener
                    .open(&descriptor.path)
                    .map_err(|e| Doc2TextError::DocumentUnreadable {
                        path: descriptor.path.clone(),
                        detail: e.to_string(),
                    })?;
            let recognizer = if config.ocr_fallback {
                engines.recognizer.as_deref()
            } else {
                None
            };
            extract::extract_paginated(
                source.as_mut(),
                recognizer,
                config.fallback_min_chars,
                on_unit,
            )
        }
        DocumentKind::Chaptered => {
            let opener = engines
                .chaptered
                .as_ref()
                .ok_or(Doc2TextError::EngineUnavailable { kind })?;
            let mut source =
                opener
                    .open(&descriptor.path)
                    .map_err(|e| Doc2TextError::DocumentUnreadable {
                        path: descriptor.path.clone(),
                        detail: e.to_string(),
                    })?;
            extract::extract_chaptered(source.as_mut(), on_unit).map_err(|e| {
                Doc2TextError::DocumentUnreadable {
                    path: descriptor.path.clone(),
                    detail: e.to_string(),
                }
            })?
        }
    };

    let unit_count = extraction.units.len();
    let text = if config.merge == MergeMode::PerUnit {
        NormalizedText::PerUnit(extraction.units)
    } else {
        NormalizedText::Whole(extraction.units.join("\n\n"))
    };

    Ok(ConversionResult {
        descriptor: descriptor.clone(),
        text,
        format: config.format,
        unit_count,
        unit_errors: extraction.errors,
    })
}

/// Convert an ordered selection of documents and persist the outputs.
///
/// Selection order is preserved throughout: it is the merge concatenation
/// order and the order documents are processed in. An empty selection is a
/// valid "nothing to do" run — zero outputs, an all-zero summary, `Ok`.
///
/// # Errors
/// Only configuration/contract violations propagate. Everything that can go
/// wrong with an individual document or write is recorded in the returned
/// [`RunSummary`] instead.
pub fn run(
    selection: &[DocumentDescriptor],
    config: &ConversionConfig,
    engines: &EngineSet,
) -> Result<RunSummary, Doc2TextError> {
    let run_start = Instant::now();
    let total = selection.len();
    let callback = config.progress_callback.clone();
    let mut summary = RunSummary::default();
    let mut planner = persist::DestinationPlanner::new();
    let mut batch: MergeBatch = Vec::new();

    if let Some(cb) = &callback {
        cb.on_run_start(total);
    }
    if total == 0 {
        info!("nothing to do: empty selection");
        if let Some(cb) = &callback {
            cb.on_run_complete(0, 0);
        }
        summary.total_duration_ms = run_start.elapsed().as_millis() as u64;
        return Ok(summary);
    }
    info!("starting conversion of {total} documents ({:?}, {:?})", config.format, config.merge);

    for (index, descriptor) in selection.iter().enumerate() {
        let name = descriptor.file_name();
        if let Some(cb) = &callback {
            cb.on_document_start(index, total, &name);
        }

        // ── CONVERT ──────────────────────────────────────────────────────
        let result = convert_document_inner(descriptor, config, engines, |unit, units_total| {
            if let Some(cb) = &callback {
                cb.on_unit_complete(index, unit, units_total);
            }
        });

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                if e.is_skip() {
                    summary.documents_skipped += 1;
                    warn!("skipping {name}: {e}");
                } else {
                    summary.documents_failed += 1;
                    warn!("failed {name}: {e}");
                }
                summary.record_failure(descriptor.path.clone(), e.to_string());
                if let Some(cb) = &callback {
                    cb.on_document_error(index, total, e.to_string());
                }
                continue;
            }
        };

        summary.documents_succeeded += 1;
        summary.units_extracted += result.unit_count;
        summary.units_failed += result.unit_errors.len();
        for unit_error in &result.unit_errors {
            summary.record_failure(descriptor.path.clone(), unit_error.to_string());
        }
        if let Some(cb) = &callback {
            cb.on_document_complete(index, total, result.unit_count);
        }

        // ── RENDER + PERSIST, per merge mode ─────────────────────────────
        let dir = output_dir_for(descriptor, config);
        match config.merge {
            MergeMode::NoMerge => {
                let payload = render::render_single(&result, config.format)?;
                let destination =
                    planner.claim(&dir, &descriptor.stem(), config.format.extension());
                write_recorded(&destination, &payload, &mut summary);
            }
            MergeMode::PerUnit => {
                let payloads = render::render_per_unit(&result, config.format)?;
                let stem = descriptor.stem();
                for (unit_index, payload) in payloads.iter().enumerate() {
                    let unit_stem = persist::unit_stem(&stem, unit_index + 1, result.unit_count);
                    let destination = planner.claim(&dir, &unit_stem, config.format.extension());
                    write_recorded(&destination, payload, &mut summary);
                }
            }
            MergeMode::Merge => {
                // Accumulated and flushed once after the loop.
                batch.push(result);
            }
        }
    }

    if config.merge == MergeMode::Merge && !batch.is_empty() {
        let payload = render::render_merged(&batch, config.format)?;
        let dir = config
            .output_dir
            .clone()
            .unwrap_or_else(|| parent_of(&batch[0].descriptor.path));
        let destination = planner.claim(&dir, &config.merged_basename, config.format.extension());
        write_recorded(&destination, &payload, &mut summary);
        info!("merged {} documents into {}", batch.len(), destination.display());
    }

    summary.total_duration_ms = run_start.elapsed().as_millis() as u64;
    info!(
        "run complete: {} succeeded, {} skipped, {} failed, {} outputs in {}ms",
        summary.documents_succeeded,
        summary.documents_skipped,
        summary.documents_failed,
        summary.outputs_written,
        summary.total_duration_ms
    );
    if let Some(cb) = &callback {
        cb.on_run_complete(total, summary.documents_succeeded);
    }
    Ok(summary)
}

/// Discover, select everything, and run — the one-call entry point for
/// non-interactive callers.
pub fn convert_path(
    input: &Path,
    config: &ConversionConfig,
    engines: &EngineSet,
) -> Result<RunSummary, Doc2TextError> {
    let selection = discover(input, &config.registry)?;
    run(&selection, config, engines)
}

fn output_dir_for(descriptor: &DocumentDescriptor, config: &ConversionConfig) -> PathBuf {
    config
        .output_dir
        .clone()
        .unwrap_or_else(|| parent_of(&descriptor.path))
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn write_recorded(destination: &Path, payload: &str, summary: &mut RunSummary) {
    match persist::write_payload(destination, payload) {
        Ok(()) => summary.outputs_written += 1,
        Err(e) => {
            warn!("{e}");
            summary.writes_failed += 1;
            summary.record_failure(destination.to_path_buf(), e.to_string());
        }
    }
}
