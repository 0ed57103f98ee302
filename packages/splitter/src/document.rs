//! Paged document access: page count and outline tree.
//!
//! [`PagedDocument`] is the seam between the splitting algorithm and the
//! file format. [`PdfDocument`] implements it on top of `lopdf`, reading the
//! `/Outlines` tree from the catalog and resolving explicit destinations,
//! named destinations and GoTo actions to 0-based page indices.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Result, SplitterError};
use crate::types::OutlineNode;

/// Maximum nesting depth of outline items before the outline is considered corrupt.
const MAX_OUTLINE_DEPTH: usize = 64;

/// Maximum chain of indirect references or named-destination hops to follow.
const MAX_REFERENCE_HOPS: usize = 16;

/// Title used for bookmarks without a readable `/Title`.
pub const UNTITLED: &str = "Untitled";

/// A read-only paginated document with an optional outline.
pub trait PagedDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// The outline tree in document order.
    ///
    /// A document without bookmarks returns an empty list. A structurally
    /// corrupt outline returns [`SplitterError::OutlineUnavailable`].
    fn outline(&self) -> Result<Vec<OutlineNode>>;
}

/// A PDF loaded into memory.
pub struct PdfDocument {
    path: PathBuf,
    inner: Document,
    page_index: HashMap<ObjectId, usize>,
}

impl PdfDocument {
    /// Open and parse a PDF file.
    ///
    /// The file handle is released as soon as the document has been read,
    /// whether parsing succeeds or not.
    ///
    /// # Errors
    /// Returns [`SplitterError::SourceUnreadable`] if the file cannot be
    /// opened or is not a parseable PDF.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = {
            let file = File::open(path).map_err(|e| unreadable(path, e))?;
            Document::load_from(file).map_err(|e| unreadable(path, e))?
        };

        tracing::debug!(path = %path.display(), "Loaded PDF");
        Ok(Self::from_document(path, inner))
    }

    /// Wrap an already-parsed document.
    #[must_use]
    pub fn from_document(path: impl Into<PathBuf>, inner: Document) -> Self {
        let page_index = inner
            .get_pages()
            .into_values()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();

        Self {
            path: path.into(),
            inner,
            page_index,
        }
    }

    /// Path the document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying `lopdf` document.
    #[must_use]
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Follow indirect references until a direct object is reached.
    fn deref<'a>(&'a self, mut object: &'a Object) -> Option<&'a Object> {
        for _ in 0..MAX_REFERENCE_HOPS {
            match object {
                Object::Reference(id) => object = self.inner.get_object(*id).ok()?,
                direct => return Some(direct),
            }
        }
        None
    }

    fn deref_dict<'a>(&'a self, object: &'a Object) -> Option<&'a Dictionary> {
        self.deref(object)?.as_dict().ok()
    }

    fn catalog(&self) -> Option<&Dictionary> {
        let root = self.inner.trailer.get(b"Root").ok()?;
        self.deref_dict(root)
    }

    /// Read a chain of sibling outline items starting at `first`.
    fn read_siblings(
        &self,
        first: &Object,
        depth: usize,
        visited: &mut HashSet<ObjectId>,
    ) -> Result<Vec<OutlineNode>> {
        if depth > MAX_OUTLINE_DEPTH {
            return Err(SplitterError::OutlineUnavailable(format!(
                "outline nested deeper than {MAX_OUTLINE_DEPTH} levels"
            )));
        }

        let mut nodes = Vec::new();
        let mut current = Some(first);

        while let Some(object) = current {
            let Object::Reference(id) = object else {
                return Err(SplitterError::OutlineUnavailable(
                    "outline item is not an indirect object".to_string(),
                ));
            };
            if !visited.insert(*id) {
                return Err(SplitterError::OutlineUnavailable(format!(
                    "outline cycle at object {} {}",
                    id.0, id.1
                )));
            }

            let item = self
                .inner
                .get_object(*id)
                .and_then(Object::as_dict)
                .map_err(|e| {
                    SplitterError::OutlineUnavailable(format!(
                        "outline item {} {} unreadable: {e}",
                        id.0, id.1
                    ))
                })?;

            let title = item
                .get(b"Title")
                .ok()
                .and_then(|t| self.deref(t))
                .and_then(decode_text_object)
                .unwrap_or_else(|| UNTITLED.to_string());

            nodes.push(OutlineNode::Leaf {
                title,
                target_page: self.item_target(item),
            });

            if let Ok(first_child) = item.get(b"First") {
                let children = self.read_siblings(first_child, depth + 1, visited)?;
                if !children.is_empty() {
                    nodes.push(OutlineNode::Group(children));
                }
            }

            current = item.get(b"Next").ok();
        }

        Ok(nodes)
    }

    /// Page targeted by an outline item, via `/Dest` or a GoTo `/A` action.
    fn item_target(&self, item: &Dictionary) -> Option<usize> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve_destination(dest, 0);
        }

        let action = self.deref_dict(item.get(b"A").ok()?)?;
        if let Ok(kind) = action.get(b"S") {
            if !matches!(self.deref(kind), Some(Object::Name(name)) if name.as_slice() == b"GoTo") {
                return None;
            }
        }
        self.resolve_destination(action.get(b"D").ok()?, 0)
    }

    /// Resolve an explicit or named destination to a page index.
    fn resolve_destination(&self, dest: &Object, hops: usize) -> Option<usize> {
        if hops > MAX_REFERENCE_HOPS {
            return None;
        }

        match self.deref(dest)? {
            Object::Array(items) => self.page_of(items.first()?),
            Object::Name(name) | Object::String(name, _) => {
                let target = self.named_destination(name)?;
                self.resolve_destination(target, hops + 1)
            }
            // Values in the destination name tree may be wrapped as << /D [...] >>
            Object::Dictionary(dict) => self.resolve_destination(dict.get(b"D").ok()?, hops + 1),
            _ => None,
        }
    }

    /// Page index for the first element of an explicit destination array.
    fn page_of(&self, page: &Object) -> Option<usize> {
        match page {
            Object::Reference(id) => self.page_index.get(id).copied(),
            // Some producers write a page number instead of a page reference.
            Object::Integer(n) => usize::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Look up a named destination in the catalog `/Dests` dictionary or the
    /// `/Names /Dests` name tree.
    fn named_destination(&self, name: &[u8]) -> Option<&Object> {
        let catalog = self.catalog()?;

        if let Some(dests) = catalog.get(b"Dests").ok().and_then(|d| self.deref_dict(d)) {
            if let Ok(found) = dests.get(name) {
                return Some(found);
            }
        }

        let names = self.deref_dict(catalog.get(b"Names").ok()?)?;
        let tree = self.deref_dict(names.get(b"Dests").ok()?)?;
        self.search_name_tree(tree, name, 0)
    }

    fn search_name_tree<'a>(
        &'a self,
        node: &'a Dictionary,
        name: &[u8],
        depth: usize,
    ) -> Option<&'a Object> {
        if depth > MAX_OUTLINE_DEPTH {
            return None;
        }

        if let Some(pairs) = node.get(b"Names").ok().and_then(|n| self.deref(n)) {
            if let Ok(pairs) = pairs.as_array() {
                for pair in pairs.chunks(2) {
                    if let [key, value] = pair {
                        if matches!(self.deref(key), Some(Object::String(k, _)) if k.as_slice() == name)
                        {
                            return Some(value);
                        }
                    }
                }
            }
        }

        let kids = node.get(b"Kids").ok().and_then(|k| self.deref(k))?.as_array().ok()?;
        kids.iter()
            .filter_map(|kid| self.deref_dict(kid))
            .find_map(|kid| self.search_name_tree(kid, name, depth + 1))
    }
}

impl PagedDocument for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_index.len()
    }

    fn outline(&self) -> Result<Vec<OutlineNode>> {
        let catalog = self.catalog().ok_or_else(|| {
            SplitterError::OutlineUnavailable("document catalog is missing".to_string())
        })?;

        let Ok(outlines) = catalog.get(b"Outlines") else {
            return Ok(Vec::new());
        };
        let outlines = self.deref_dict(outlines).ok_or_else(|| {
            SplitterError::OutlineUnavailable("/Outlines is not a dictionary".to_string())
        })?;
        let Ok(first) = outlines.get(b"First") else {
            return Ok(Vec::new());
        };

        let mut visited = HashSet::new();
        self.read_siblings(first, 0, &mut visited)
    }
}

fn unreadable(path: &Path, reason: impl std::fmt::Display) -> SplitterError {
    SplitterError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn decode_text_object(object: &Object) -> Option<String> {
    let text = match object {
        Object::String(bytes, _) => decode_pdf_text(bytes),
        Object::Name(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Decode a PDF text string.
///
/// Handles UTF-16BE and UTF-8 byte order marks; anything else is treated as
/// PDFDocEncoding, approximated by Latin-1.
#[must_use]
pub fn decode_pdf_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}
