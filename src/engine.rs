//! Locate and bind the PDFium shared library.
//!
//! `pdfium-render` loads PDFium dynamically, so the library has to be found
//! at runtime. Candidates are tried in order and the first one that binds
//! wins:
//!
//! 1. an explicit path (`--pdfium-lib` / `PDFIUM_LIB_PATH`), either the
//!    library file itself or the directory holding it;
//! 2. the per-version cache directory shared with other pdf2md tools
//!    (see [`pdfium_cache_dir`]);
//! 3. the system library search path.
//!
//! Nothing is downloaded; the batch never touches the network.

use crate::error::ExportError;
use pdfium_render::prelude::Pdfium;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The pdfium-binaries release whose cache directory is searched.
pub const PDFIUM_VERSION: &str = "7690";

/// One place a PDFium library may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryLocation {
    /// Given on the command line or through `PDFIUM_LIB_PATH`.
    Explicit(PathBuf),
    /// Inside [`pdfium_cache_dir`].
    Cached(PathBuf),
    /// Whatever the dynamic loader finds by name.
    System,
}

impl fmt::Display for LibraryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryLocation::Explicit(p) => write!(f, "{} (explicit)", p.display()),
            LibraryLocation::Cached(p) => write!(f, "{} (cache)", p.display()),
            LibraryLocation::System => write!(f, "system library search path"),
        }
    }
}

/// Returns the per-version cache directory for the PDFium library.
///
/// Default locations:
/// - **macOS**: `~/Library/Caches/pdf2md/pdfium-{VERSION}/`
/// - **Linux**: `~/.cache/pdf2md/pdfium-{VERSION}/`
/// - **Windows**: `%LOCALAPPDATA%\pdf2md\pdfium-{VERSION}\`
///
/// Override by setting `PDFIUM_AUTO_CACHE_DIR`.
pub fn pdfium_cache_dir() -> PathBuf {
    if let Ok(override_dir) = std::env::var("PDFIUM_AUTO_CACHE_DIR") {
        return PathBuf::from(override_dir).join(format!("pdfium-{PDFIUM_VERSION}"));
    }

    let base = dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(std::env::temp_dir);

    base.join("pdf2md").join(format!("pdfium-{PDFIUM_VERSION}"))
}

/// The ordered list of locations [`bind_pdfium`] will try.
///
/// A directory given as `explicit` is completed with the platform library
/// name (`libpdfium.so`, `libpdfium.dylib`, `pdfium.dll`). An explicit path
/// that does not exist is dropped with a warning.
pub fn library_candidates(explicit: Option<&Path>) -> Vec<LibraryLocation> {
    let mut candidates = Vec::with_capacity(3);

    if let Some(path) = explicit {
        let lib = if path.is_dir() {
            Pdfium::pdfium_platform_library_name_at_path(path)
        } else {
            path.to_path_buf()
        };
        if lib.exists() {
            candidates.push(LibraryLocation::Explicit(lib));
        } else {
            warn!("PDFium library '{}' not found; trying other locations", lib.display());
        }
    }

    let cached = Pdfium::pdfium_platform_library_name_at_path(&pdfium_cache_dir());
    if cached.exists() {
        candidates.push(LibraryLocation::Cached(cached));
    }

    candidates.push(LibraryLocation::System);
    candidates
}

/// Bind to the first PDFium library that loads.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, ExportError> {
    let candidates = library_candidates(explicit);
    let mut failures = Vec::with_capacity(candidates.len());

    for location in &candidates {
        let bound = match location {
            LibraryLocation::Explicit(p) | LibraryLocation::Cached(p) => Pdfium::bind_to_library(p),
            LibraryLocation::System => Pdfium::bind_to_system_library(),
        };
        match bound {
            Ok(bindings) => {
                info!("Bound PDFium from {}", location);
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => {
                debug!("PDFium bind failed for {}: {:?}", location, e);
                failures.push(format!("  • {location}: {e:?}"));
            }
        }
    }

    Err(ExportError::EngineUnavailable {
        detail: "no candidate library could be loaded".into(),
        tried: failures.join("\n"),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn cache_dir_is_deterministic() {
        let d1 = pdfium_cache_dir();
        let d2 = pdfium_cache_dir();
        assert_eq!(d1, d2);
        assert!(d1.to_str().unwrap().contains(PDFIUM_VERSION));
    }

    #[test]
    fn system_is_always_the_last_candidate() {
        let candidates = library_candidates(None);
        assert_eq!(candidates.last(), Some(&LibraryLocation::System));
    }

    #[test]
    fn explicit_directory_is_completed_with_library_name() {
        let tmp = TempDir::new().unwrap();
        let lib = Pdfium::pdfium_platform_library_name_at_path(tmp.path());
        fs::write(&lib, b"not really a library").unwrap();

        let candidates = library_candidates(Some(tmp.path()));
        assert_eq!(candidates.first(), Some(&LibraryLocation::Explicit(lib)));
    }

    #[test]
    fn missing_explicit_path_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let candidates = library_candidates(Some(&tmp.path().join("nope.so")));
        assert!(!candidates
            .iter()
            .any(|c| matches!(c, LibraryLocation::Explicit(_))));
    }

    #[test]
    fn location_display() {
        assert_eq!(
            LibraryLocation::System.to_string(),
            "system library search path"
        );
        assert!(LibraryLocation::Explicit("/opt/libpdfium.so".into())
            .to_string()
            .ends_with("(explicit)"));
    }
}
