//! Core data types for the splitter.
//!
//! Pages are 0-indexed throughout the library.

use serde::{Deserialize, Serialize};

/// A node in a document outline (bookmark tree).
///
/// A bookmark with sub-bookmarks is represented as a `Leaf` immediately
/// followed by a `Group` holding its children, so sibling order is document
/// order and nesting is explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineNode {
    /// A single bookmark.
    ///
    /// `target_page` is `None` when the destination could not be resolved
    /// to a page of the document.
    Leaf {
        title: String,
        target_page: Option<usize>,
    },

    /// Nested bookmarks one level deeper than their surroundings.
    Group(Vec<OutlineNode>),
}

impl OutlineNode {
    /// Create a leaf pointing at a resolved page.
    #[must_use]
    pub fn leaf(title: impl Into<String>, target_page: usize) -> Self {
        Self::Leaf {
            title: title.into(),
            target_page: Some(target_page),
        }
    }

    /// Create a leaf whose destination could not be resolved.
    #[must_use]
    pub fn unresolved(title: impl Into<String>) -> Self {
        Self::Leaf {
            title: title.into(),
            target_page: None,
        }
    }

    /// Create a group of nested nodes.
    #[must_use]
    pub fn group(children: impl IntoIterator<Item = OutlineNode>) -> Self {
        Self::Group(children.into_iter().collect())
    }
}

/// A contiguous, titled page range: the unit of export.
///
/// Invariant: `start_page <= end_page`, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title (outline title or generated "Pages a-b").
    pub title: String,

    /// First page (inclusive, 0-indexed).
    pub start_page: usize,

    /// Last page (inclusive, 0-indexed).
    pub end_page: usize,
}

impl Section {
    /// Create a new section.
    #[must_use]
    pub fn new(title: impl Into<String>, start_page: usize, end_page: usize) -> Self {
        debug_assert!(start_page <= end_page, "section must not end before it starts");
        Self {
            title: title.into(),
            start_page,
            end_page,
        }
    }

    /// Number of pages covered by this section.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.end_page - self.start_page + 1
    }

    /// Whether two sections share at least one page.
    #[must_use]
    pub fn overlaps(&self, other: &Section) -> bool {
        self.start_page <= other.end_page && other.start_page <= self.end_page
    }

    /// Human-readable 1-based page range, e.g. "1-15".
    #[must_use]
    pub fn display_range(&self) -> String {
        format!("{}-{}", self.start_page + 1, self.end_page + 1)
    }
}
