//! Result types produced by converters and by the batch runner.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Text payload returned by a [`crate::converter::MarkdownConverter`].
///
/// Engines differ in which field they fill; both are optional and the
/// driver uses the first non-empty one (see [`ConversionResult::into_markdown`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    /// Plain text content of the document.
    pub text_content: Option<String>,
    /// Markdown rendering of the document.
    pub markdown: Option<String>,
}

impl ConversionResult {
    /// Result carrying only `text_content`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text_content: Some(text.into()),
            markdown: None,
        }
    }

    /// Result carrying only `markdown`.
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            text_content: None,
            markdown: Some(markdown.into()),
        }
    }

    /// The first non-empty of `text_content` and `markdown`, in that order.
    pub fn into_markdown(self) -> Option<String> {
        self.text_content
            .filter(|s| !s.is_empty())
            .or(self.markdown.filter(|s| !s.is_empty()))
    }
}

/// Metadata read from a PDF's information dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// The PDF that was attempted.
    pub source: PathBuf,
    /// Where its Markdown was (or would have been) written.
    pub destination: PathBuf,
    /// Set when the file failed; `None` means converted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FileError>,
}

impl FileOutcome {
    pub fn is_converted(&self) -> bool {
        self.error.is_none()
    }
}

/// All outcomes of one batch, in discovery order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.converted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_wins_when_present() {
        let r = ConversionResult {
            text_content: Some("# from text".into()),
            markdown: Some("# from markdown".into()),
        };
        assert_eq!(r.into_markdown().as_deref(), Some("# from text"));
    }

    #[test]
    fn empty_text_content_falls_back_to_markdown() {
        let r = ConversionResult {
            text_content: Some(String::new()),
            markdown: Some("body".into()),
        };
        assert_eq!(r.into_markdown().as_deref(), Some("body"));
        assert_eq!(
            ConversionResult::from_markdown("only").into_markdown().as_deref(),
            Some("only")
        );
    }

    #[test]
    fn nothing_usable_is_none() {
        assert_eq!(ConversionResult::default().into_markdown(), None);
        assert_eq!(ConversionResult::from_text("").into_markdown(), None);
    }

    #[test]
    fn report_counts() {
        let ok = FileOutcome {
            source: "a.pdf".into(),
            destination: "a.md".into(),
            error: None,
        };
        let bad = FileOutcome {
            source: "b.pdf".into(),
            destination: "b.md".into(),
            error: Some(FileError::NoContent { path: "b.pdf".into() }),
        };
        let report = BatchReport {
            outcomes: vec![ok.clone(), bad, ok],
        };
        assert_eq!(report.converted(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn converted_outcome_omits_error_in_json() {
        let ok = FileOutcome {
            source: "a.pdf".into(),
            destination: "out/a.md".into(),
            error: None,
        };
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, r#"{"source":"a.pdf","destination":"out/a.md"}"#);
    }
}
