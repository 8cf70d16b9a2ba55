//! The conversion engine seam.
//!
//! [`crate::batch`] only ever sees a [`MarkdownConverter`]: "given a file
//! path, return Markdown text or fail". [`PdfiumConverter`] is the production
//! engine; tests plug in their own implementations to exercise the driver
//! without a PDFium library on the machine.
//!
//! # Example
//!
//! ```rust
//! use pdf2md_export::{ConversionResult, ConvertError, MarkdownConverter};
//! use std::path::Path;
//!
//! struct Echo;
//!
//! impl MarkdownConverter for Echo {
//!     fn convert(&self, path: &Path) -> Result<ConversionResult, ConvertError> {
//!         Ok(ConversionResult::from_markdown(format!("# {}\n", path.display())))
//!     }
//! }
//!
//! let md = Echo.convert(Path::new("a.pdf")).unwrap().into_markdown();
//! assert_eq!(md.as_deref(), Some("# a.pdf\n"));
//! ```

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::{ConversionResult, DocumentMetadata};
use crate::pipeline::extract::{self, PageText};
use crate::pipeline::postprocess;
use pdfium_render::prelude::Pdfium;
use std::path::Path;
use tracing::debug;

/// Turns one document into Markdown text.
///
/// Implementations are constructed once per batch and called once per file,
/// strictly one call at a time.
pub trait MarkdownConverter {
    fn convert(&self, path: &Path) -> Result<ConversionResult, ConvertError>;
}

impl<C: MarkdownConverter + ?Sized> MarkdownConverter for &C {
    fn convert(&self, path: &Path) -> Result<ConversionResult, ConvertError> {
        (**self).convert(path)
    }
}

impl<C: MarkdownConverter + ?Sized> MarkdownConverter for Box<C> {
    fn convert(&self, path: &Path) -> Result<ConversionResult, ConvertError> {
        (**self).convert(path)
    }
}

/// PDF → Markdown through the text layer exposed by PDFium.
///
/// Bind the library with [`crate::engine::bind_pdfium`] and hand the
/// resulting [`Pdfium`] in; the same instance serves every file.
pub struct PdfiumConverter {
    pdfium: Pdfium,
    config: ConversionConfig,
}

impl PdfiumConverter {
    pub fn new(pdfium: Pdfium, config: ConversionConfig) -> Self {
        Self { pdfium, config }
    }
}

impl MarkdownConverter for PdfiumConverter {
    fn convert(&self, path: &Path) -> Result<ConversionResult, ConvertError> {
        let document = extract::extract_document(&self.pdfium, path, &self.config)?;
        debug!(
            "Assembling {} page(s) from {}",
            document.pages.len(),
            path.display()
        );
        Ok(assemble_document(
            &document.pages,
            &document.metadata,
            &self.config,
        ))
    }
}

/// Join page texts into one cleaned Markdown document.
///
/// A document whose pages carry no visible text (scans, image-only PDFs)
/// yields an empty [`ConversionResult`] even when front-matter is enabled,
/// so the driver reports it as having no content.
pub fn assemble_document(
    pages: &[PageText],
    metadata: &DocumentMetadata,
    config: &ConversionConfig,
) -> ConversionResult {
    let mut body = String::new();
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            body.push_str(&config.page_separator.render(page.page_num));
        }
        body.push_str(&page.text);
    }

    let body = postprocess::clean_markdown(&body);
    if body.trim().is_empty() {
        return ConversionResult::default();
    }

    if config.include_metadata {
        ConversionResult::from_text(format_yaml_front_matter(metadata) + &body)
    } else {
        ConversionResult::from_text(body)
    }
}

/// Format document metadata as YAML front matter.
pub fn format_yaml_front_matter(meta: &DocumentMetadata) -> String {
    let mut yaml = String::from("---\n");

    let fields = [
        ("title", &meta.title),
        ("author", &meta.author),
        ("subject", &meta.subject),
        ("creator", &meta.creator),
        ("producer", &meta.producer),
    ];
    for (key, value) in fields {
        if let Some(v) = value {
            yaml.push_str(&format!("{}: \"{}\"\n", key, yaml_escape(v)));
        }
    }
    yaml.push_str(&format!("pages: {}\n", meta.page_count));
    if !meta.pdf_version.is_empty() {
        yaml.push_str(&format!("pdf_version: \"{}\"\n", yaml_escape(&meta.pdf_version)));
    }

    yaml.push_str("---\n\n");
    yaml
}

/// Escape `s` for a YAML double-quoted scalar.
fn yaml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSeparator;

    fn pages(texts: &[&str]) -> Vec<PageText> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| PageText {
                page_num: i + 1,
                text: t.to_string(),
            })
            .collect()
    }

    fn meta() -> DocumentMetadata {
        DocumentMetadata {
            title: Some("Annual \"Report\"".into()),
            author: Some("Finance".into()),
            page_count: 2,
            pdf_version: "Pdf1_7".into(),
            ..Default::default()
        }
    }

    #[test]
    fn pages_joined_with_blank_line_by_default() {
        let r = assemble_document(&pages(&["one\r\n", "two"]), &meta(), &ConversionConfig::default());
        assert_eq!(r.into_markdown().as_deref(), Some("one\n\n\ntwo\n"));
    }

    #[test]
    fn comment_separator_names_following_page() {
        let config = ConversionConfig::builder()
            .page_separator(PageSeparator::Comment)
            .build()
            .unwrap();
        let md = assemble_document(&pages(&["one", "two"]), &meta(), &config)
            .into_markdown()
            .unwrap();
        assert_eq!(md, "one\n\n<!-- page 2 -->\n\ntwo\n");
    }

    #[test]
    fn blank_document_has_no_content_even_with_metadata() {
        let config = ConversionConfig::builder()
            .include_metadata(true)
            .build()
            .unwrap();
        let r = assemble_document(&pages(&["  \n", "\u{200B}"]), &meta(), &config);
        assert_eq!(r.into_markdown(), None);
    }

    #[test]
    fn front_matter_prepended_and_escaped() {
        let config = ConversionConfig::builder()
            .include_metadata(true)
            .build()
            .unwrap();
        let md = assemble_document(&pages(&["body"]), &meta(), &config)
            .into_markdown()
            .unwrap();
        assert!(md.starts_with("---\ntitle: \"Annual \\\"Report\\\"\"\nauthor: \"Finance\"\n"));
        assert!(md.contains("pages: 2\n"));
        assert!(md.ends_with("---\n\nbody\n"));
    }

    #[test]
    fn boxed_and_borrowed_converters_delegate() {
        struct Fixed;
        impl MarkdownConverter for Fixed {
            fn convert(&self, _path: &Path) -> Result<ConversionResult, ConvertError> {
                Ok(ConversionResult::from_text("x"))
            }
        }
        fn run<C: MarkdownConverter>(c: C) -> Option<String> {
            c.convert(Path::new("a.pdf")).ok()?.into_markdown()
        }
        let boxed: Box<dyn MarkdownConverter> = Box::new(Fixed);
        assert_eq!(run(boxed).as_deref(), Some("x"));
        assert_eq!(run(&Fixed).as_deref(), Some("x"));
    }

    #[test]
    fn control_characters_are_escaped_in_front_matter() {
        let meta = DocumentMetadata {
            title: Some("Q3\tResults\u{7}\r\nDraft".into()),
            ..Default::default()
        };
        let yaml = format_yaml_front_matter(&meta);
        assert!(
            yaml.contains("title: \"Q3\\tResults\\u0007\\r\\nDraft\"\n"),
            "got: {yaml}"
        );
        assert_eq!(yaml.lines().filter(|l| l.starts_with("title:")).count(), 1);
    }
}
