//! Outline flattening: nested bookmarks to an ordered list of start pages.

use super::types::{BoundaryPolicy, DropReason, DroppedEntry, FlatEntry};
use crate::types::OutlineNode;

/// Output of a flattening pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    /// Usable entries in pre-order traversal order.
    pub entries: Vec<FlatEntry>,

    /// Entries skipped during the walk.
    pub dropped: Vec<DroppedEntry>,
}

/// Walks an outline tree depth-first and emits `(title, start_page)` pairs.
///
/// Sibling order is preserved and nesting depth is discarded from the
/// output; the boundary policy decides which depths are kept at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineFlattener {
    policy: BoundaryPolicy,
}

impl OutlineFlattener {
    /// Create a flattener with the given boundary policy.
    #[must_use]
    pub fn new(policy: BoundaryPolicy) -> Self {
        Self { policy }
    }

    /// Flatten `nodes` against a document of `total_pages` pages.
    ///
    /// Leaves without a resolved page, or pointing past the last page, are
    /// dropped as [`DropReason::UnresolvableDestination`].
    #[must_use]
    pub fn flatten(&self, nodes: &[OutlineNode], total_pages: usize) -> Flattened {
        let mut out = Flattened::default();
        self.walk(nodes, 0, total_pages, &mut out);
        out
    }

    fn walk(&self, nodes: &[OutlineNode], depth: usize, total_pages: usize, out: &mut Flattened) {
        for node in nodes {
            match node {
                OutlineNode::Group(children) => {
                    self.walk(children, depth + 1, total_pages, out);
                }
                OutlineNode::Leaf { title, target_page } => {
                    if !self.policy.accepts(depth) {
                        tracing::debug!(title = %title, depth, "Outline entry below boundary depth");
                        out.dropped
                            .push(DroppedEntry::new(title.clone(), DropReason::BeyondMaxDepth));
                        continue;
                    }

                    match target_page {
                        Some(page) if *page < total_pages => {
                            out.entries.push(FlatEntry::new(title.clone(), *page));
                        }
                        _ => {
                            tracing::debug!(
                                title = %title,
                                target = ?target_page,
                                total_pages,
                                "Dropping outline entry with unresolvable destination"
                            );
                            out.dropped.push(DroppedEntry::new(
                                title.clone(),
                                DropReason::UnresolvableDestination,
                            ));
                        }
                    }
                }
            }
        }
    }
}
