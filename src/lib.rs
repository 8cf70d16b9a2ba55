//! # pdf2md-export
//!
//! Batch-convert PDF files, or whole directory trees of them, into Markdown
//! files that mirror the input layout.
//!
//! ## Pipeline Overview
//!
//! ```text
//! source (file or dir)
//!  │
//!  ├─ 1. Discover  *.pdf (case-insensitive), one level or recursive
//!  ├─ 2. Layout    out/<relative path>.md
//!  ├─ 3. Guard     existing destination + no --overwrite → fail this file
//!  ├─ 4. Convert   MarkdownConverter (PDFium text layer by default)
//!  ├─ 5. Write     UTF-8, parent directories created on demand
//!  └─ 6. Report    "Converted …" on stdout / "Failed to convert …" on stderr
//! ```
//!
//! A failing file never stops the batch. Only a missing source or an empty
//! discovery end the run, and they do so before any file is written.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2md_export::{bind_pdfium, prepare_batch, run_batch};
//! use pdf2md_export::{BatchConfig, ConversionConfig, PdfiumConverter};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig {
//!         recursive: true,
//!         ..Default::default()
//!     };
//!     let batch = prepare_batch(Path::new("papers/"), &config)?;
//!     let converter = PdfiumConverter::new(bind_pdfium(None)?, ConversionConfig::default());
//!     let report = run_batch(
//!         &converter,
//!         &batch,
//!         &config,
//!         &mut std::io::stdout(),
//!         &mut std::io::stderr(),
//!     )?;
//!     eprintln!("{} converted, {} failed", report.converted(), report.failed());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2md-export` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{convert_file, prepare_batch, run_batch, Batch};
pub use config::{
    BatchConfig, ConversionConfig, ConversionConfigBuilder, PageSelection, PageSeparator,
    ReportFormat,
};
pub use converter::{MarkdownConverter, PdfiumConverter};
pub use engine::bind_pdfium;
pub use error::{ConvertError, ExportError, FileError};
pub use output::{BatchReport, ConversionResult, DocumentMetadata, FileOutcome};
