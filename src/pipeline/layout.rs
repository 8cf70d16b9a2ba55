//! Output layout: map a source PDF to its Markdown destination.
//!
//! Pure path arithmetic; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

/// Extension given to every output file.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Destination of `candidate` under `output_root`.
///
/// * `source_is_file` — the user named a single PDF: keep its file name only.
/// * otherwise — keep the path relative to `source_root`, so the input
///   tree is mirrored under `output_root`.
///
/// Only the last extension is replaced (`a.b.pdf` → `a.b.md`). A candidate
/// that does not live under `source_root` falls back to its file name.
pub fn output_path(
    candidate: &Path,
    source_root: &Path,
    output_root: &Path,
    source_is_file: bool,
) -> PathBuf {
    let relative: &Path = if source_is_file {
        file_name_of(candidate)
    } else {
        candidate
            .strip_prefix(source_root)
            .unwrap_or_else(|_| file_name_of(candidate))
    };
    output_root
        .join(relative)
        .with_extension(MARKDOWN_EXTENSION)
}

fn file_name_of(path: &Path) -> &Path {
    path.file_name().map(Path::new).unwrap_or(path)
}
