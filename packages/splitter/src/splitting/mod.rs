//! Section splitting for paginated documents.
//!
//! Turns a (possibly nested) outline into flat, non-overlapping page ranges,
//! falling back to fixed-size page chunks when no usable outline exists.

mod engine;
mod flatten;
mod resolve;
mod types;

pub use engine::SplitEngine;
pub use flatten::{Flattened, OutlineFlattener};
pub use resolve::{chunk_pages, RangeResolver, ResolvedRanges};
pub use types::{BoundaryPolicy, DropReason, DroppedEntry, FlatEntry, SplitMethod, SplitPlan};
