//! Range resolution: start pages to inclusive page ranges.

use super::types::{DropReason, DroppedEntry, FlatEntry, SplitMethod};
use crate::config::{DEFAULT_CHUNK_SIZE, DEFAULT_MIN_OUTLINE_ENTRIES};
use crate::types::Section;

/// Sections produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRanges {
    pub sections: Vec<Section>,
    pub method: SplitMethod,
    pub dropped: Vec<DroppedEntry>,
}

/// Turns flat outline entries into non-overlapping sections.
///
/// Each entry ends where its successor (by page) begins. When fewer than
/// `min_entries` usable sections remain, the outline is discarded and the
/// document is cut into fixed-size chunks instead.
#[derive(Debug, Clone, Copy)]
pub struct RangeResolver {
    chunk_size: usize,
    min_entries: usize,
}

impl Default for RangeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_MIN_OUTLINE_ENTRIES)
    }
}

impl RangeResolver {
    /// Create a resolver.
    ///
    /// A `chunk_size` of zero is treated as one page per chunk.
    #[must_use]
    pub fn new(chunk_size: usize, min_entries: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            min_entries,
        }
    }

    /// Resolve `entries` against a document of `total_pages` pages.
    #[must_use]
    pub fn resolve(&self, entries: Vec<FlatEntry>, total_pages: usize) -> ResolvedRanges {
        let (sections, dropped) = outline_ranges(entries, total_pages);

        if sections.len() < self.min_entries {
            tracing::debug!(
                usable = sections.len(),
                min = self.min_entries,
                "Outline too sparse, falling back to page chunks"
            );
            return ResolvedRanges {
                sections: chunk_pages(total_pages, self.chunk_size),
                method: SplitMethod::Chunks,
                dropped,
            };
        }

        ResolvedRanges {
            sections,
            method: SplitMethod::Outline,
            dropped,
        }
    }

    /// Fixed-size chunking with this resolver's chunk size.
    #[must_use]
    pub fn chunks(&self, total_pages: usize) -> Vec<Section> {
        chunk_pages(total_pages, self.chunk_size)
    }
}

/// Compute outline-driven sections.
///
/// Entries are sorted by start page (stable, so traversal order breaks ties).
/// An entry sharing its start page with an earlier one would end before it
/// starts and is dropped. Entries past the last page are ignored.
///
/// Sections begin at the first outline entry: pages before it belong to no
/// section and are not exported.
fn outline_ranges(
    mut entries: Vec<FlatEntry>,
    total_pages: usize,
) -> (Vec<Section>, Vec<DroppedEntry>) {
    let mut dropped = Vec::new();

    entries.retain(|entry| {
        if entry.start_page < total_pages {
            true
        } else {
            dropped.push(DroppedEntry::new(
                entry.title.clone(),
                DropReason::UnresolvableDestination,
            ));
            false
        }
    });
    entries.sort_by_key(|entry| entry.start_page);

    let mut starts: Vec<FlatEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if starts.last().is_some_and(|prev| prev.start_page == entry.start_page) {
            tracing::debug!(
                title = %entry.title,
                start_page = entry.start_page,
                "Dropping outline entry that shares its start page"
            );
            dropped.push(DroppedEntry::new(entry.title, DropReason::InvalidSectionRange));
            continue;
        }
        starts.push(entry);
    }

    let next_starts: Vec<usize> = starts
        .iter()
        .skip(1)
        .map(|entry| entry.start_page)
        .chain(std::iter::once(total_pages))
        .collect();

    let sections: Vec<Section> = starts
        .into_iter()
        .zip(next_starts)
        .map(|(entry, next_start)| Section::new(entry.title, entry.start_page, next_start - 1))
        .collect();
    debug_assert!(sections.windows(2).all(|pair| !pair[0].overlaps(&pair[1])));

    (sections, dropped)
}

/// Partition `[0, total_pages)` into consecutive windows of `chunk_size` pages.
///
/// Windows are titled by their 1-based page range ("Pages 1-15"); the last
/// window is truncated at the final page.
///
/// # Examples
/// ```
/// use paper_splitter::splitting::chunk_pages;
///
/// let chunks = chunk_pages(40, 15);
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(chunks[2].title, "Pages 31-40");
/// ```
#[must_use]
pub fn chunk_pages(total_pages: usize, chunk_size: usize) -> Vec<Section> {
    let chunk_size = chunk_size.max(1);

    (0..total_pages)
        .step_by(chunk_size)
        .map(|start| {
            let end = (start + chunk_size - 1).min(total_pages - 1);
            let mut section = Section::new(String::new(), start, end);
            section.title = format!("Pages {}", section.display_range());
            section
        })
        .collect()
}
