//! Batch driver: discovery → per-file conversion → report lines.
//!
//! ## Failure isolation
//!
//! [`convert_file`] returns `Result<(), FileError>` for exactly one file and
//! [`run_batch`] turns that into a [`FileOutcome`] before moving on, so a
//! corrupt PDF or an existing destination never stops the files after it.
//! Only [`ExportError`]s from [`prepare_batch`] end a run early, and they
//! happen before anything is written.

use crate::config::{BatchConfig, ReportFormat};
use crate::converter::MarkdownConverter;
use crate::error::{ExportError, FileError};
use crate::output::{BatchReport, FileOutcome};
use crate::pipeline::{discover, layout};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The files one run will attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Canonical source path as given by the user (file or directory).
    pub source_root: PathBuf,
    /// The user named one file rather than a directory.
    pub source_is_file: bool,
    /// PDFs in discovery order.
    pub candidates: Vec<PathBuf>,
}

impl Batch {
    /// Destination of `candidate` under `output_root`.
    pub fn output_path(&self, candidate: &Path, output_root: &Path) -> PathBuf {
        layout::output_path(candidate, &self.source_root, output_root, self.source_is_file)
    }
}

/// Validate `source` and discover its PDFs.
///
/// Subdirectories of a directory source are searched when
/// `config.recursive` is set.
///
/// # Errors
/// - [`ExportError::SourceNotFound`] when `source` does not exist
/// - [`ExportError::NoPdfsFound`] when discovery finds nothing
pub fn prepare_batch(source: &Path, config: &BatchConfig) -> Result<Batch, ExportError> {
    if !source.exists() {
        return Err(ExportError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }
    let source_root = source
        .canonicalize()
        .map_err(|_| ExportError::SourceNotFound {
            path: source.to_path_buf(),
        })?;

    let candidates = discover::discover_pdfs(&source_root, config.recursive);
    if candidates.is_empty() {
        return Err(ExportError::NoPdfsFound { path: source_root });
    }

    Ok(Batch {
        source_is_file: source_root.is_file(),
        source_root,
        candidates,
    })
}

/// Convert one PDF and write its Markdown to `output_path`.
///
/// The destination guard runs first: with `overwrite` off an existing
/// `output_path` fails the file without calling the converter. Parent
/// directories are created as needed and never removed.
pub fn convert_file<C: MarkdownConverter + ?Sized>(
    converter: &C,
    pdf_path: &Path,
    output_path: &Path,
    overwrite: bool,
) -> Result<(), FileError> {
    if output_path.exists() && !overwrite {
        return Err(FileError::DestinationExists {
            path: output_path.to_path_buf(),
        });
    }

    let result = converter
        .convert(pdf_path)
        .map_err(|e| FileError::ConversionFailed {
            path: pdf_path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let markdown = result.into_markdown().ok_or_else(|| FileError::NoContent {
        path: pdf_path.to_path_buf(),
    })?;

    let write_failed = |e: io::Error| FileError::WriteFailed {
        path: output_path.to_path_buf(),
        detail: e.to_string(),
    };
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }
    // `String` is always UTF-8, so the bytes go out as-is.
    std::fs::write(output_path, markdown.as_bytes()).map_err(write_failed)?;

    debug!(
        "Wrote {} bytes to {}",
        markdown.len(),
        output_path.display()
    );
    Ok(())
}

/// Run every candidate of `batch` through `converter`.
///
/// Writes one line per file: successes to `out`, failures to `err`
/// (success lines are skipped when `config.quiet`). Per-file failures are
/// recorded in the returned report; only a failure to write a report line
/// is returned as `Err`.
pub fn run_batch<C, O, E>(
    converter: &C,
    batch: &Batch,
    config: &BatchConfig,
    out: &mut O,
    err: &mut E,
) -> io::Result<BatchReport>
where
    C: MarkdownConverter + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let mut report = BatchReport {
        outcomes: Vec::with_capacity(batch.candidates.len()),
    };

    for pdf_path in &batch.candidates {
        let destination = batch.output_path(pdf_path, &config.output_dir);
        let result = convert_file(converter, pdf_path, &destination, config.overwrite);

        let outcome = FileOutcome {
            source: pdf_path.clone(),
            destination,
            error: result.err(),
        };

        match &outcome.error {
            None => {
                if !config.quiet {
                    write_line(out, &outcome, config.format)?;
                }
            }
            Some(e) => {
                debug!("{} not converted ({e:?})", outcome.source.display());
                write_line(err, &outcome, config.format)?;
            }
        }
        report.outcomes.push(outcome);
    }

    out.flush()?;
    err.flush()?;

    info!(
        "Batch complete: {} converted, {} failed, {} total",
        report.converted(),
        report.failed(),
        report.outcomes.len()
    );
    Ok(report)
}

fn write_line<W: Write + ?Sized>(
    w: &mut W,
    outcome: &FileOutcome,
    format: ReportFormat,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => match &outcome.error {
            None => writeln!(
                w,
                "Converted {} -> {}",
                outcome.source.display(),
                outcome.destination.display()
            ),
            Some(e) => writeln!(w, "Failed to convert {}: {}", outcome.source.display(), e),
        },
        ReportFormat::Json => {
            let line = serde_json::to_string(outcome).map_err(io::Error::other)?;
            writeln!(w, "{line}")
        }
    }
}
