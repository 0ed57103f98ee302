//! Types for the section splitting system.

use std::fmt;

use serde::Serialize;

use crate::types::Section;

/// Which outline entries count as section boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Every entry at every depth starts a section.
    #[default]
    AllLevels,

    /// Only entries with depth `<= n` start a section (0 = top level).
    ///
    /// Deeper entries are dropped and their pages fall into the enclosing
    /// kept section.
    MaxDepth(usize),
}

impl BoundaryPolicy {
    /// Whether an entry at `depth` is a section boundary.
    #[must_use]
    pub fn accepts(&self, depth: usize) -> bool {
        match self {
            Self::AllLevels => true,
            Self::MaxDepth(max) => depth <= *max,
        }
    }
}

/// An outline entry reduced to its title and start page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub title: String,
    pub start_page: usize,
}

impl FlatEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, start_page: usize) -> Self {
        Self {
            title: title.into(),
            start_page,
        }
    }
}

/// Why an outline entry did not become a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The entry's destination is not a page of the document.
    UnresolvableDestination,

    /// The entry would produce a section ending before it starts.
    InvalidSectionRange,

    /// The entry is nested deeper than the boundary policy allows.
    BeyondMaxDepth,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnresolvableDestination => "unresolvable destination",
            Self::InvalidSectionRange => "invalid section range",
            Self::BeyondMaxDepth => "nested beyond max depth",
        };
        f.write_str(text)
    }
}

/// An outline entry that was skipped, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedEntry {
    pub title: String,
    pub reason: DropReason,
}

impl DroppedEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, reason: DropReason) -> Self {
        Self {
            title: title.into(),
            reason,
        }
    }
}

/// How the sections of a plan were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    /// From the document outline.
    Outline,

    /// Fixed-size page chunks.
    Chunks,
}

impl SplitMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Chunks => "chunks",
        }
    }
}

/// Result of planning a split: ordered sections plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// Total pages of the source document.
    pub total_pages: usize,

    /// Sections sorted by `start_page`, pairwise non-overlapping.
    pub sections: Vec<Section>,

    /// How the sections were derived.
    pub method: SplitMethod,

    /// Outline entries that were dropped along the way.
    pub dropped: Vec<DroppedEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_policy_accepts() {
        assert!(BoundaryPolicy::AllLevels.accepts(0));
        assert!(BoundaryPolicy::AllLevels.accepts(7));

        let policy = BoundaryPolicy::MaxDepth(1);
        assert!(policy.accepts(0));
        assert!(policy.accepts(1));
        assert!(!policy.accepts(2));
    }

    #[test]
    fn test_drop_reason_display() {
        assert_eq!(
            DropReason::UnresolvableDestination.to_string(),
            "unresolvable destination"
        );
        assert_eq!(DropReason::BeyondMaxDepth.to_string(), "nested beyond max depth");
    }

    #[test]
    fn test_split_method_as_str() {
        assert_eq!(SplitMethod::Outline.as_str(), "outline");
        assert_eq!(SplitMethod::Chunks.as_str(), "chunks");
    }
}
