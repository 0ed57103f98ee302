//! Split engine that turns a paged document into a section plan.

use super::flatten::OutlineFlattener;
use super::resolve::RangeResolver;
use super::types::{SplitMethod, SplitPlan};
use crate::config::SplitterConfig;
use crate::document::PagedDocument;
use crate::error::SplitterError;
use crate::types::OutlineNode;

/// Engine for planning sections from an outline.
///
/// Flattens the outline according to the boundary policy, resolves page
/// ranges, and falls back to fixed-size chunks when the outline is missing,
/// corrupt, or too sparse.
#[derive(Debug, Clone, Copy)]
pub struct SplitEngine {
    flattener: OutlineFlattener,
    resolver: RangeResolver,
}

impl SplitEngine {
    /// Create a new split engine.
    #[must_use]
    pub fn new(flattener: OutlineFlattener, resolver: RangeResolver) -> Self {
        Self {
            flattener,
            resolver,
        }
    }

    /// Create an engine from a splitter configuration.
    #[must_use]
    pub fn from_config(config: &SplitterConfig) -> Self {
        Self::new(
            OutlineFlattener::new(config.boundary),
            RangeResolver::new(config.chunk_size, config.min_outline_entries),
        )
    }

    /// Plan the sections of a document.
    ///
    /// An unreadable outline is not an error here: it is logged and the
    /// document is chunked.
    pub fn plan<D: PagedDocument + ?Sized>(&self, document: &D) -> SplitPlan {
        let total_pages = document.page_count();

        match document.outline() {
            Ok(outline) => self.plan_outline(&outline, total_pages),
            Err(SplitterError::OutlineUnavailable(reason)) => {
                tracing::warn!(reason = %reason, "Outline unreadable, using page chunks");
                self.plan_chunks(total_pages)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read outline, using page chunks");
                self.plan_chunks(total_pages)
            }
        }
    }

    /// Plan sections from an already-extracted outline.
    #[must_use]
    pub fn plan_outline(&self, outline: &[OutlineNode], total_pages: usize) -> SplitPlan {
        let flattened = self.flattener.flatten(outline, total_pages);
        let mut dropped = flattened.dropped;

        let resolved = self.resolver.resolve(flattened.entries, total_pages);
        dropped.extend(resolved.dropped);

        tracing::debug!(
            method = resolved.method.as_str(),
            sections = resolved.sections.len(),
            dropped = dropped.len(),
            "Resolved outline"
        );

        SplitPlan {
            total_pages,
            sections: resolved.sections,
            method: resolved.method,
            dropped,
        }
    }

    /// Plan fixed-size chunks, ignoring any outline.
    #[must_use]
    pub fn plan_chunks(&self, total_pages: usize) -> SplitPlan {
        SplitPlan {
            total_pages,
            sections: self.resolver.chunks(total_pages),
            method: SplitMethod::Chunks,
            dropped: Vec::new(),
        }
    }
}

impl Default for SplitEngine {
    fn default() -> Self {
        Self::new(OutlineFlattener::default(), RangeResolver::default())
    }
}
