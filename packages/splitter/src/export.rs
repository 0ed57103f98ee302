//! Export of sections as standalone PDF files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use lopdf::{Document, Object};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::SECTION_FILE_EXTENSION;
use crate::error::{Result, SplitterError};
use crate::types::Section;

/// Fallback filename stem for titles with no usable characters.
const EMPTY_TITLE_STEM: &str = "section";

/// Runs of underscores and whitespace produced by sanitizing.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(?:[\s_]*_)?").expect("valid regex"));

/// Make a title safe for use in a filename.
///
/// Applies NFKC normalization (so ligatures like "ﬁ" become "fi"), replaces
/// anything other than letters, digits, spaces, `-` and `_` with `_`,
/// collapses separator runs, and caps the result at `max_len` characters.
///
/// # Examples
/// ```
/// use paper_splitter::export::sanitize_title;
///
/// assert_eq!(sanitize_title("1. Introduction", 50), "1_ Introduction");
/// assert_eq!(sanitize_title("A/B: Testing?", 50), "A_B_ Testing");
/// assert_eq!(sanitize_title("???", 50), "section");
/// ```
#[must_use]
pub fn sanitize_title(title: &str, max_len: usize) -> String {
    let replaced: String = title
        .nfkc()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let collapsed = SEPARATOR_RUN.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches(|c: char| c == '_' || c.is_whitespace());

    let capped: String = trimmed.chars().take(max_len).collect();
    let capped = capped.trim_end_matches(|c: char| c == '_' || c.is_whitespace());

    if capped.is_empty() {
        EMPTY_TITLE_STEM.to_string()
    } else {
        capped.to_string()
    }
}

/// Filename for the `ordinal`-th section of a run.
///
/// The zero-padded ordinal prefix keeps names unique within a run even when
/// titles collide after sanitizing.
#[must_use]
pub fn section_file_name(ordinal: usize, title: &str, max_title_len: usize) -> String {
    format!(
        "{ordinal:03}_{}.{SECTION_FILE_EXTENSION}",
        sanitize_title(title, max_title_len)
    )
}

/// Writes sections of one source document into an output directory.
#[derive(Debug, Clone)]
pub struct SectionExporter {
    output_dir: PathBuf,
    max_title_len: usize,
}

impl SectionExporter {
    /// Create an exporter writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, max_title_len: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_title_len,
        }
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the `ordinal`-th section will be written to.
    #[must_use]
    pub fn path_for(&self, ordinal: usize, section: &Section) -> PathBuf {
        self.output_dir
            .join(section_file_name(ordinal, &section.title, self.max_title_len))
    }

    /// Create the output directory if needed.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Export one section and return the path written and page count.
    pub fn write(
        &self,
        source: &Document,
        ordinal: usize,
        section: &Section,
    ) -> Result<(PathBuf, usize)> {
        let path = self.path_for(ordinal, section);
        let pages = write_section(source, section, &path)?;
        tracing::info!(path = %path.display(), pages, "Wrote section");
        Ok((path, pages))
    }
}

/// Write pages `[start_page, end_page]` of `source` to a new PDF at `path`.
///
/// Pages past the end of the source are silently excluded. The outline of
/// the source is not carried over since its destinations point at pages
/// that no longer exist in the extract.
///
/// # Returns
/// The number of pages written.
///
/// # Errors
/// [`SplitterError::InvalidSectionRange`] if the section starts past the last
/// page; IO and PDF errors from writing.
pub fn write_section(source: &Document, section: &Section, path: &Path) -> Result<usize> {
    let pages = source.get_pages();
    let total = pages.len();

    if section.start_page >= total || section.end_page < section.start_page {
        return Err(SplitterError::InvalidSectionRange {
            title: section.title.clone(),
            start_page: section.start_page,
            end_page: section.end_page,
        });
    }

    let end_page = section.end_page.min(total - 1);
    if end_page != section.end_page {
        tracing::debug!(
            title = %section.title,
            requested = section.end_page,
            clamped = end_page,
            "Clamped section end to last page"
        );
    }

    // lopdf page numbers are 1-based
    let to_delete: Vec<u32> = pages
        .keys()
        .copied()
        .filter(|&number| {
            let index = number as usize - 1;
            index < section.start_page || index > end_page
        })
        .collect();

    let mut extract = source.clone();
    extract.delete_pages(&to_delete);
    strip_outline(&mut extract);
    extract.prune_objects();
    extract.save(path)?;

    Ok(end_page - section.start_page + 1)
}

/// Remove the outline from a document's catalog.
fn strip_outline(doc: &mut Document) {
    let Ok(root_id) = doc.trailer.get(b"Root").and_then(Object::as_reference) else {
        return;
    };
    if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(root_id) {
        catalog.remove(b"Outlines");
        catalog.remove(b"PageMode");
    }
}
