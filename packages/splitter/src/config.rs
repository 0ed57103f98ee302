//! Configuration constants and validation functions for the splitter.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SplitterError};
use crate::splitting::BoundaryPolicy;

/// Default number of pages per chunk when no usable outline exists.
pub const DEFAULT_CHUNK_SIZE: usize = 15;

/// Minimum number of usable outline entries before the outline is trusted.
///
/// Outlines with fewer entries (a single "Cover" bookmark, say) are discarded
/// in favour of fixed-size chunks.
pub const DEFAULT_MIN_OUTLINE_ENTRIES: usize = 3;

/// Maximum length (in characters) of the title part of an exported filename.
pub const DEFAULT_MAX_TITLE_LEN: usize = 50;

/// File extension of exported section files.
pub const SECTION_FILE_EXTENSION: &str = "pdf";

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Explicit configuration for a split run.
///
/// Every relative path the splitter touches is resolved against
/// `root_directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Directory that relative source and output paths are resolved against.
    pub root_directory: PathBuf,

    /// Pages per chunk for the fallback partition.
    pub chunk_size: usize,

    /// Minimum usable outline entries; below this the outline is ignored.
    pub min_outline_entries: usize,

    /// Which outline entries count as section boundaries.
    pub boundary: BoundaryPolicy,

    /// Maximum title length used in exported filenames.
    pub max_title_len: usize,
}

impl SplitterConfig {
    /// Create a configuration rooted at `root_directory` with default settings.
    #[must_use]
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self {
            root_directory: root_directory.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_outline_entries: DEFAULT_MIN_OUTLINE_ENTRIES,
            boundary: BoundaryPolicy::default(),
            max_title_len: DEFAULT_MAX_TITLE_LEN,
        }
    }

    /// Set the fallback chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the minimum number of usable outline entries.
    #[must_use]
    pub fn with_min_outline_entries(mut self, min_outline_entries: usize) -> Self {
        self.min_outline_entries = min_outline_entries;
        self
    }

    /// Set the boundary policy.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the filename title length cap.
    #[must_use]
    pub fn with_max_title_len(mut self, max_title_len: usize) -> Self {
        self.max_title_len = max_title_len;
        self
    }

    /// Validate the numeric settings.
    ///
    /// # Returns
    /// * `Ok(())` if all values are usable
    /// * `Err(SplitterError::InvalidConfig)` otherwise
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SplitterError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.max_title_len == 0 {
            return Err(SplitterError::InvalidConfig(
                "max_title_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that the root directory exists and is a directory.
    pub fn validate_root(&self) -> Result<()> {
        if !self.root_directory.exists() {
            return Err(SplitterError::InvalidConfig(format!(
                "root directory does not exist: {}",
                self.root_directory.display()
            )));
        }
        if !self.root_directory.is_dir() {
            return Err(SplitterError::InvalidConfig(format!(
                "root directory is not a directory: {}",
                self.root_directory.display()
            )));
        }
        Ok(())
    }

    /// Resolve a path against the root directory.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_directory.join(path)
        }
    }
}

/// Parse a date in YYYY-MM-DD format.
///
/// # Examples
/// ```
/// use paper_splitter::config::parse_date;
///
/// assert!(parse_date("2025-01-01").is_ok());
/// assert!(parse_date("invalid").is_err());
/// assert!(parse_date("2025-13-01").is_err()); // Invalid month
/// ```
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(SplitterError::InvalidDate(date_str.to_string()));
    }

    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| SplitterError::InvalidDate(date_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SplitterConfig::new("/tmp");
        assert_eq!(config.chunk_size, 15);
        assert_eq!(config.min_outline_entries, 3);
        assert_eq!(config.boundary, BoundaryPolicy::AllLevels);
        assert_eq!(config.max_title_len, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SplitterConfig::new("/data")
            .with_chunk_size(10)
            .with_min_outline_entries(5)
            .with_boundary(BoundaryPolicy::MaxDepth(1))
            .with_max_title_len(20);

        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.min_outline_entries, 5);
        assert_eq!(config.boundary, BoundaryPolicy::MaxDepth(1));
        assert_eq!(config.max_title_len, 20);
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let config = SplitterConfig::new("/tmp").with_chunk_size(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_validate_rejects_zero_title_len() {
        let config = SplitterConfig::new("/tmp").with_max_title_len(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SplitterConfig::new(dir.path()).validate_root().is_ok());

        let missing = dir.path().join("nope");
        assert!(SplitterConfig::new(&missing).validate_root().is_err());

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(SplitterConfig::new(&file).validate_root().is_err());
    }

    #[test]
    fn test_resolve_path() {
        let config = SplitterConfig::new("/research");
        assert_eq!(
            config.resolve_path(Path::new("ml/Sources/paper.pdf")),
            PathBuf::from("/research/ml/Sources/paper.pdf")
        );
        assert_eq!(
            config.resolve_path(Path::new("/elsewhere/paper.pdf")),
            PathBuf::from("/elsewhere/paper.pdf")
        );
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2025-02-29").is_err()); // Not a leap year
        assert!(parse_date("2025/01/01").is_err());
        assert!(parse_date("2025-1-1").is_err());
        assert!(parse_date("").is_err());
    }
}
