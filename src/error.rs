//! Error types for the pdf2md-export library.
//!
//! Three error types reflect three distinct failure scopes:
//!
//! * [`ExportError`] — **Fatal**: the batch cannot start at all (source path
//!   missing, nothing to convert, PDFium unavailable). Returned as
//!   `Err(ExportError)` before any file is touched.
//!
//! * [`FileError`] — **Non-fatal**: one file failed (destination already
//!   exists, engine rejected the PDF, write failed) but every other file in
//!   the batch is still attempted. Stored inside
//!   [`crate::output::FileOutcome`].
//!
//! * [`ConvertError`] — raised by a [`crate::converter::MarkdownConverter`]
//!   implementation. The driver folds it into
//!   [`FileError::ConversionFailed`] so the report carries one message per
//!   file regardless of which engine produced it.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2md-export library.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The source argument does not point at anything on disk.
    #[error("Source path does not exist: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// Discovery ran but found nothing to convert.
    #[error("No PDF files found at the specified source.")]
    NoPdfsFound { path: PathBuf },

    /// No PDFium library could be bound.
    #[error(
        "Failed to bind to pdfium library: {detail}\n\n\
Locations tried:\n{tried}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium (or pass --pdfium-lib) to use an existing copy."
    )]
    EngineUnavailable { detail: String, tried: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single file of the batch.
///
/// Carries plain strings rather than `std::io::Error` so outcomes can be
/// cloned, compared in tests and serialised into the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileError {
    /// The Markdown file is already there and `--overwrite` was not given.
    #[error("{} already exists; rerun with --overwrite to replace it.", .path.display())]
    DestinationExists { path: PathBuf },

    /// The converter succeeded but produced no text.
    #[error("No Markdown content returned for {}", .path.display())]
    NoContent { path: PathBuf },

    /// The converter raised an error for this file.
    #[error("{detail}")]
    ConversionFailed { path: PathBuf, detail: String },

    /// Creating the output directory or writing the file failed.
    #[error("Failed to write output file '{}': {detail}", .path.display())]
    WriteFailed { path: PathBuf, detail: String },
}

/// Errors raised by a conversion engine for one document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{}' (first bytes: {magic:?})", .path.display())]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{}' is corrupt: {detail}", .path.display())]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{}' is encrypted and requires a password; provide it with --password", .path.display())]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{}'", .path.display())]
    WrongPassword { path: PathBuf },

    /// The page selection matches no page of this document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// PDFium could not produce the text layer of a page.
    #[error("Text extraction failed for page {page}: {detail}")]
    TextExtraction { page: usize, detail: String },

    /// Reading the input file failed.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_exists_mentions_overwrite_flag() {
        let e = FileError::DestinationExists {
            path: PathBuf::from("out/report.md"),
        };
        let msg = e.to_string();
        assert!(msg.contains("out/report.md"), "got: {msg}");
        assert!(msg.contains("--overwrite"), "got: {msg}");
    }

    #[test]
    fn no_content_display() {
        let e = FileError::NoContent {
            path: PathBuf::from("scan.pdf"),
        };
        assert_eq!(e.to_string(), "No Markdown content returned for scan.pdf");
    }

    #[test]
    fn conversion_failed_shows_engine_detail_only() {
        let e = FileError::ConversionFailed {
            path: PathBuf::from("a.pdf"),
            detail: "PDF 'a.pdf' is corrupt: bad xref".into(),
        };
        assert_eq!(e.to_string(), "PDF 'a.pdf' is corrupt: bad xref");
    }

    #[test]
    fn file_error_serialises_with_kind_tag() {
        let e = FileError::NoContent {
            path: PathBuf::from("x.pdf"),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"kind":"no_content","path":"x.pdf"}"#);
    }

    #[test]
    fn no_pdfs_found_display() {
        let e = ExportError::NoPdfsFound {
            path: PathBuf::from("/tmp/empty"),
        };
        assert!(e.to_string().contains("No PDF files found"));
    }

    #[test]
    fn page_out_of_range_display() {
        let e = ConvertError::PageOutOfRange { page: 9, total: 4 };
        assert!(e.to_string().contains("Page 9"));
        assert!(e.to_string().contains("4 pages"));
    }

    #[test]
    fn convert_errors_fit_on_one_report_line() {
        let path = PathBuf::from("a.pdf");
        let errors = [
            ConvertError::NotAPdf {
                path: path.clone(),
                magic: *b"GIF8",
            },
            ConvertError::PasswordRequired { path: path.clone() },
            ConvertError::WrongPassword { path },
        ];
        for e in errors {
            assert!(!e.to_string().contains('\n'), "multi-line: {e}");
        }
    }
}
