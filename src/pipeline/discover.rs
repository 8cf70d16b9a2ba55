//! Discovery: enumerate the PDF files under a source path.
//!
//! Entries are visited in file-name order at every directory level so two
//! runs over the same tree produce the same batch, and therefore the same
//! report, line for line.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension matched case-insensitively.
pub const PDF_EXTENSION: &str = "pdf";

/// True when `path` ends in `.pdf`, in any letter case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}

/// Return the PDF files under `root`.
///
/// * `root` is a file → `[root]` when it has a PDF extension, else `[]`.
/// * `root` is a directory → its PDF files; immediate children only unless
///   `recursive`. Directories whose names end in `.pdf` are never returned.
///
/// A missing `root` yields an empty list; callers reject it beforehand.
pub fn discover_pdfs(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if root.is_file() {
        return if has_pdf_extension(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let pdfs: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                None
            }
        })
        .map(walkdir::DirEntry::into_path)
        // `is_file` follows symlinks, so links to PDFs count and
        // `*.pdf` directories do not.
        .filter(|path| has_pdf_extension(path) && path.is_file())
        .collect();

    debug!(
        "Discovered {} PDF(s) under {} (recursive={})",
        pdfs.len(),
        root.display(),
        recursive
    );
    pdfs
}
