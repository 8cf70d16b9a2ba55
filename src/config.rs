//! Configuration types for batch PDF-to-Markdown export.
//!
//! Two structs split the knobs by who consumes them:
//!
//! * [`ConversionConfig`] — read by [`crate::converter::PdfiumConverter`]
//!   for every document (page selection, separators, front-matter, password).
//!   Built via [`ConversionConfigBuilder`].
//! * [`BatchConfig`] — read by [`crate::batch::run_batch`] (output root,
//!   destination guard, report format).

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "markdown_exports";

/// Configuration applied to every document the converter opens.
///
/// # Example
/// ```rust
/// use pdf2md_export::{ConversionConfig, PageSelection, PageSeparator};
///
/// let config = ConversionConfig::builder()
///     .pages(PageSelection::Range(1, 3))
///     .page_separator(PageSeparator::HorizontalRule)
///     .include_metadata(true)
///     .build()
///     .unwrap();
/// assert!(config.include_metadata);
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Page selection. Default: All pages.
    pub pages: PageSelection,

    /// Separator inserted between pages. Default: a blank line.
    pub page_separator: PageSeparator,

    /// Prepend YAML front-matter with document metadata. Default: false.
    pub include_metadata: bool,

    /// PDF user password for encrypted documents.
    ///
    /// One password is tried for every file in the batch; documents that
    /// need a different one fail individually.
    pub password: Option<String>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("pages", &self.pages)
            .field("page_separator", &self.page_separator)
            .field("include_metadata", &self.include_metadata)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn page_separator(mut self, sep: PageSeparator) -> Self {
        self.config.page_separator = sep;
        self
    }

    pub fn include_metadata(mut self, v: bool) -> Self {
        self.config.include_metadata = v;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ExportError> {
        self.config.pages.validate()?;
        Ok(self.config)
    }
}

/// How per-file outcomes are written to stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportFormat {
    /// `Converted <src> -> <dst>` / `Failed to convert <src>: <msg>`. (default)
    #[default]
    Text,
    /// One serialised [`crate::output::FileOutcome`] per line.
    Json,
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Destination root. Default: `./markdown_exports`.
    pub output_dir: PathBuf,

    /// Descend into subdirectories of a directory source. Default: false.
    pub recursive: bool,

    /// Replace Markdown files that already exist. Default: false.
    pub overwrite: bool,

    /// Report line format. Default: [`ReportFormat::Text`].
    pub format: ReportFormat,

    /// Suppress success lines; failures are always reported. Default: false.
    pub quiet: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            recursive: false,
            overwrite: false,
            format: ReportFormat::default(),
            quiet: false,
        }
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Specifies which pages of each PDF to convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Convert all pages (default).
    #[default]
    All,
    /// Convert a single page (1-indexed).
    Single(usize),
    /// Convert a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Convert specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// The first 1-indexed page the selection asks for, used in error reports.
    pub fn first_requested(&self) -> usize {
        match self {
            PageSelection::All => 1,
            PageSelection::Single(p) => *p,
            PageSelection::Range(start, _) => *start,
            PageSelection::Set(pages) => pages.iter().copied().min().unwrap_or(1),
        }
    }

    fn validate(&self) -> Result<(), ExportError> {
        match self {
            PageSelection::All => Ok(()),
            PageSelection::Single(0) => Err(ExportError::InvalidConfig(
                "Pages are 1-indexed, minimum is 1 (got 0)".into(),
            )),
            PageSelection::Single(_) => Ok(()),
            PageSelection::Range(start, end) if *start < 1 || start > end => {
                Err(ExportError::InvalidConfig(format!(
                    "Invalid page range '{start}-{end}': start must be >= 1 and <= end"
                )))
            }
            PageSelection::Range(..) => Ok(()),
            PageSelection::Set(pages) if pages.is_empty() || pages.contains(&0) => Err(
                ExportError::InvalidConfig("Page sets must list 1-indexed pages".into()),
            ),
            PageSelection::Set(_) => Ok(()),
        }
    }
}

/// Parses `all`, `5`, `3-15` or `1,3,5,7`.
impl FromStr for PageSelection {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let number = |p: &str| -> Result<usize, ExportError> {
            p.trim()
                .parse::<usize>()
                .map_err(|_| ExportError::InvalidConfig(format!("Invalid page number: '{}'", p.trim())))
        };

        let selection = if s == "all" {
            PageSelection::All
        } else if let Some((start, end)) = s.split_once('-') {
            PageSelection::Range(number(start)?, number(end)?)
        } else if s.contains(',') {
            PageSelection::Set(s.split(',').map(number).collect::<Result<Vec<_>, _>>()?)
        } else {
            PageSelection::Single(number(s.as_str())?)
        };

        selection.validate()?;
        Ok(selection)
    }
}

/// How to separate pages in the assembled Markdown output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSeparator {
    /// No separator; pages joined with "\n\n". (default)
    #[default]
    None,
    /// Horizontal rule: "\n\n---\n\n"
    HorizontalRule,
    /// HTML comment with page number: "<!-- page N -->"
    Comment,
    /// Custom string inserted between pages.
    Custom(String),
}

impl PageSeparator {
    /// Render the separator string for the given page number (1-indexed).
    pub fn render(&self, page_num: usize) -> String {
        match self {
            PageSeparator::None => "\n\n".to_string(),
            PageSeparator::HorizontalRule => "\n\n---\n\n".to_string(),
            PageSeparator::Comment => format!("\n\n<!-- page {} -->\n\n", page_num),
            PageSeparator::Custom(s) => format!("\n\n{}\n\n", s),
        }
    }

    /// Parse `--separator`: `none`, `hr`/`---`, `comment`, or anything else verbatim.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" => PageSeparator::None,
            "hr" | "---" => PageSeparator::HorizontalRule,
            "comment" => PageSeparator::Comment,
            _ => PageSeparator::Custom(s.to_string()),
        }
    }
}

/// Replace a leading `~` with the user's home directory.
///
/// Paths without a leading `~` component, and systems without a home
/// directory, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
