//! Text extraction: open a PDF with pdfium and read each selected page's text layer.
//!
//! Everything here is blocking and runs on the caller's thread; the batch
//! converts one document at a time.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::DocumentMetadata;
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Text of one page, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_num: usize,
    pub text: String,
}

/// Everything read from one PDF.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub metadata: DocumentMetadata,
    pub pages: Vec<PageText>,
}

/// Reject files that do not start with the `%PDF` magic bytes.
///
/// Files shorter than four bytes are left for pdfium to reject.
pub fn check_pdf_magic(pdf_path: &Path) -> Result<(), ConvertError> {
    let mut file = std::fs::File::open(pdf_path).map_err(|e| ConvertError::Io {
        path: pdf_path.to_path_buf(),
        source: e,
    })?;
    let mut magic = [0u8; 4];
    if file.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
        return Err(ConvertError::NotAPdf {
            path: pdf_path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}

/// Open `pdf_path` and extract the pages selected by `config.pages`.
pub fn extract_document(
    pdfium: &Pdfium,
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<ExtractedDocument, ConvertError> {
    check_pdf_magic(pdf_path)?;

    let password = config.password.as_deref();
    let document = pdfium.load_pdf_from_file(pdf_path, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                ConvertError::WrongPassword {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                ConvertError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            }
        } else {
            ConvertError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: err_str,
            }
        }
    })?;

    let metadata = read_metadata(&document);
    let total_pages = metadata.page_count;
    info!("PDF loaded: {} ({} pages)", pdf_path.display(), total_pages);

    let page_indices = config.pages.to_indices(total_pages);
    if page_indices.is_empty() {
        return Err(ConvertError::PageOutOfRange {
            page: config.pages.first_requested(),
            total: total_pages,
        });
    }

    let pages = document.pages();
    let mut texts = Vec::with_capacity(page_indices.len());

    for idx in page_indices {
        let page_num = idx + 1;
        let index = u16::try_from(idx).map_err(|_| ConvertError::PageOutOfRange {
            page: page_num,
            total: total_pages,
        })?;

        let page = pages
            .get(index)
            .map_err(|e| ConvertError::TextExtraction {
                page: page_num,
                detail: format!("{:?}", e),
            })?;

        let text = page
            .text()
            .map_err(|e| ConvertError::TextExtraction {
                page: page_num,
                detail: format!("{:?}", e),
            })?
            .all();

        debug!("Extracted page {} → {} chars", page_num, text.chars().count());
        texts.push(PageText { page_num, text });
    }

    Ok(ExtractedDocument {
        metadata,
        pages: texts,
    })
}

fn read_metadata(document: &PdfDocument<'_>) -> DocumentMetadata {
    let metadata = document.metadata();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().trim().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn magic_bytes_accept_pdf_header() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("ok.pdf");
        fs::write(&p, b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n").unwrap();
        assert!(check_pdf_magic(&p).is_ok());
    }

    #[test]
    fn magic_bytes_reject_other_content() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("fake.pdf");
        fs::write(&p, b"PK\x03\x04 zip archive").unwrap();
        match check_pdf_magic(&p) {
            Err(ConvertError::NotAPdf { magic, .. }) => assert_eq!(&magic, b"PK\x03\x04"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn magic_bytes_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("gone.pdf");
        assert!(matches!(check_pdf_magic(&p), Err(ConvertError::Io { .. })));
    }
}
