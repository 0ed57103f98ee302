//! Error types for the splitter.
//!
//! Uses the dual-error pattern: `SplitterError` for library consumers with
//! detailed error context, while per-entry outline problems are recorded as
//! [`DropReason`](crate::splitting::DropReason) values on the split plan and
//! never abort a run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// The source document could not be opened or parsed.
    ///
    /// This is the only condition that aborts a whole split.
    #[error("Cannot read source document {}: {reason}", .path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// The outline is missing or structurally corrupt.
    #[error("Outline unavailable: {0}")]
    OutlineUnavailable(String),

    /// A section would end before it starts.
    #[error("Invalid section range for '{title}': pages {start_page}-{end_page}")]
    InvalidSectionRange {
        title: String,
        start_page: usize,
        end_page: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid command-line arguments.
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// Invalid date format.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD (e.g., 2025-01-01)")]
    InvalidDate(String),

    /// Low-level PDF error while writing a section.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
