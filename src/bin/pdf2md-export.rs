//! CLI binary for pdf2md-export.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `BatchConfig` / `ConversionConfig` and streams the per-file report.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use pdf2md_export::config::{expand_home, DEFAULT_OUTPUT_DIR};
use pdf2md_export::{
    bind_pdfium, prepare_batch, run_batch, BatchConfig, ConversionConfig, PageSelection,
    PageSeparator, PdfiumConverter, ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # One file into ./markdown_exports/report.md
  pdf2md-export report.pdf

  # A folder tree, mirrored under exported_md/
  pdf2md-export papers/ --recursive --output-dir exported_md

  # Re-run over an existing export, replacing what is there
  pdf2md-export papers/ -r --overwrite

  # First three pages of each file, with page markers and front-matter
  pdf2md-export scans/ --pages 1-3 --separator comment --metadata

  # Machine-readable report
  pdf2md-export papers/ -r --json > converted.jsonl 2> failed.jsonl

EXIT STATUS:
  0  every file was attempted (individual files may still have failed)
  1  the PDFium engine could not be loaded
  2  bad arguments: source missing or no PDF files found

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium (file or directory)
  PDFIUM_AUTO_CACHE_DIR   Override the pdfium cache directory searched at startup
  RUST_LOG                Log filter (overrides --verbose)
"#;

/// Convert PDF files to Markdown files, mirroring the input layout.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2md-export",
    version,
    about = "Convert PDF files to Markdown files, one .md per .pdf",
    long_about = "Convert a PDF file, or every PDF in a directory (optionally recursively), \
to Markdown. Output files mirror the input layout under --output-dir. A file that fails \
is reported and skipped; the rest of the batch still runs.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// File or directory containing PDFs.
    source: PathBuf,

    /// Directory to write Markdown files into.
    #[arg(long, env = "PDF2MD_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Recursively search directories for PDFs.
    #[arg(short, long)]
    recursive: bool,

    /// Overwrite existing Markdown files.
    #[arg(long)]
    overwrite: bool,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "PDF2MD_PAGES", default_value = "all")]
    pages: PageSelection,

    /// Page separator: none, hr, comment, or custom string.
    #[arg(long, env = "PDF2MD_SEPARATOR", default_value = "none")]
    separator: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2MD_PASSWORD")]
    password: Option<String>,

    /// Prepend YAML front-matter with document metadata.
    #[arg(long, env = "PDF2MD_METADATA")]
    metadata: bool,

    /// Report each file as a JSON line instead of text.
    #[arg(long, env = "PDF2MD_JSON")]
    json: bool,

    /// Path to libpdfium, or the directory containing it.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2MD_VERBOSE")]
    verbose: bool,

    /// Only report failures.
    #[arg(short, long, env = "PDF2MD_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stderr carries the failure lines of the report, so library logs stay
    // at ERROR unless asked for.
    let filter = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Resolve paths ────────────────────────────────────────────────────
    let source = expand_home(&cli.source);
    let output_dir = absolute(&expand_home(&cli.output_dir))?;

    // ── Build configs ────────────────────────────────────────────────────
    let batch_config = BatchConfig {
        output_dir,
        recursive: cli.recursive,
        overwrite: cli.overwrite,
        format: if cli.json {
            ReportFormat::Json
        } else {
            ReportFormat::Text
        },
        quiet: cli.quiet,
    };

    // ── Discovery ────────────────────────────────────────────────────────
    // Boundary errors go through clap so they look (and exit) like any
    // other usage error.
    let batch = match prepare_batch(&source, &batch_config) {
        Ok(batch) => batch,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };
    let conversion = build_conversion_config(&cli)?;

    // ── Engine ───────────────────────────────────────────────────────────
    let pdfium =
        bind_pdfium(cli.pdfium_lib.as_deref()).context("Failed to load the PDFium engine")?;
    let converter = PdfiumConverter::new(pdfium, conversion);

    // ── Run ──────────────────────────────────────────────────────────────
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_batch(
        &converter,
        &batch,
        &batch_config,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
    .context("Failed to write conversion report")?;

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_conversion_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .pages(cli.pages.clone())
        .page_separator(PageSeparator::parse(&cli.separator))
        .include_metadata(cli.metadata);

    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }

    builder.build().context("Invalid configuration")
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve output directory {}", path.display()))
}
