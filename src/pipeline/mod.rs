//! Pipeline stages for batch PDF-to-Markdown export.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own; only [`extract`] needs a PDFium library.
//!
//! ## Data Flow
//!
//! ```text
//! discover ──▶ layout ──▶ extract ──▶ postprocess
//! (walkdir)    (paths)    (pdfium)    (cleanup)
//! ```
//!
//! 1. [`discover`]    — enumerate `*.pdf` files under the source path
//! 2. [`layout`]      — map each PDF to its `.md` destination (pure)
//! 3. [`extract`]     — open the PDF and read the selected pages' text
//! 4. [`postprocess`] — deterministic whitespace and invisible-character cleanup

pub mod discover;
pub mod extract;
pub mod layout;
pub mod postprocess;
