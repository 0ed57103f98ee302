//! Paper Splitter - Split papers and conference proceedings into per-section PDFs.
//!
//! This crate reads a PDF's outline (bookmarks), turns it into flat,
//! non-overlapping page ranges and exports each range as its own PDF. When a
//! document has no usable outline it is cut into fixed-size page chunks.
//!
//! # Example
//!
//! ```
//! use paper_splitter::splitting::SplitEngine;
//! use paper_splitter::types::OutlineNode;
//!
//! let outline = vec![
//!     OutlineNode::leaf("Introduction", 0),
//!     OutlineNode::leaf("Method", 10),
//!     OutlineNode::leaf("Results", 25),
//! ];
//! let plan = SplitEngine::default().plan_outline(&outline, 30);
//!
//! let ranges: Vec<_> = plan.sections.iter().map(|s| (s.start_page, s.end_page)).collect();
//! assert_eq!(ranges, vec![(0, 9), (10, 24), (25, 29)]);
//! ```
//!
//! # Architecture
//!
//! - [`types`]: Outline nodes and sections
//! - [`document`]: Paged document trait and the `lopdf`-backed PDF reader
//! - [`splitting`]: Outline flattening, range resolution and chunk fallback
//! - [`export`]: Filename sanitizing and per-section PDF writing
//! - [`report`]: JSON/YAML result and error payloads
//! - [`splitter`]: Main splitter service
//! - [`config`]: Configuration and validation
//! - [`dates`]: Week arithmetic helper
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod dates;
pub mod document;
pub mod error;
pub mod export;
pub mod report;
pub mod splitter;
pub mod splitting;
pub mod types;

// Re-export main functions
pub use splitter::{split_document, split_document_with, ExportMode};

// Re-export commonly used items
pub use config::SplitterConfig;
pub use document::{PagedDocument, PdfDocument};
pub use error::{Result, SplitterError};
pub use report::{ErrorReport, OutputFormat, SectionRecord, SplitReport};
pub use types::{OutlineNode, Section};
