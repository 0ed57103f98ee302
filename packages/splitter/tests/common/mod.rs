//! PDF fixtures built with lopdf for the integration tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::{dictionary, Document, Object, ObjectId};

/// A bookmark in a fixture outline.
#[derive(Debug, Clone)]
pub struct Bookmark {
    pub title: String,
    /// Target page (0-based). `None` points at a missing named destination.
    pub page: Option<usize>,
    pub children: Vec<Bookmark>,
}

/// Bookmark pointing at `page`.
pub fn bookmark(title: &str, page: usize) -> Bookmark {
    Bookmark {
        title: title.to_string(),
        page: Some(page),
        children: Vec::new(),
    }
}

/// Bookmark whose destination does not exist.
pub fn dangling(title: &str) -> Bookmark {
    Bookmark {
        title: title.to_string(),
        page: None,
        children: Vec::new(),
    }
}

impl Bookmark {
    pub fn with_children(mut self, children: Vec<Bookmark>) -> Self {
        self.children = children;
        self
    }
}

/// Build a document with `pages` empty pages, each tagged with `/Marker <index>`.
fn build_document(pages: usize) -> (Document, Vec<ObjectId>, ObjectId) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let page_ids: Vec<ObjectId> = (0..pages)
        .map(|index| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Marker" => index as i64,
            })
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    (doc, page_ids, catalog_id)
}

/// Add a sibling chain of outline items; returns the first and last ids.
fn add_items(
    doc: &mut Document,
    parent: ObjectId,
    items: &[Bookmark],
    page_ids: &[ObjectId],
) -> Option<(ObjectId, ObjectId)> {
    if items.is_empty() {
        return None;
    }

    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    for (i, item) in items.iter().enumerate() {
        let dest: Object = match item.page {
            Some(page) if page < page_ids.len() => {
                vec![Object::Reference(page_ids[page]), "Fit".into()].into()
            }
            Some(page) => vec![Object::Integer(page as i64), "Fit".into()].into(),
            None => Object::string_literal("missing-destination"),
        };

        let mut dict = dictionary! {
            "Title" => Object::string_literal(item.title.as_str()),
            "Parent" => parent,
            "Dest" => dest,
        };
        if i > 0 {
            dict.set("Prev", ids[i - 1]);
        }
        if i + 1 < ids.len() {
            dict.set("Next", ids[i + 1]);
        }
        if let Some((first, last)) = add_items(doc, ids[i], &item.children, page_ids) {
            dict.set("First", first);
            dict.set("Last", last);
            dict.set("Count", item.children.len() as i64);
        }

        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    Some((ids[0], ids[ids.len() - 1]))
}

fn set_outlines(doc: &mut Document, catalog_id: ObjectId, outlines_id: ObjectId) {
    if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(catalog_id) {
        catalog.set("Outlines", outlines_id);
    }
}

/// Write a PDF with `pages` pages and the given outline (empty = no outline).
pub fn write_pdf(path: &Path, pages: usize, outline: &[Bookmark]) {
    let (mut doc, page_ids, catalog_id) = build_document(pages);

    if !outline.is_empty() {
        let outlines_id = doc.new_object_id();
        let mut outlines = dictionary! {
            "Type" => "Outlines",
            "Count" => outline.len() as i64,
        };
        if let Some((first, last)) = add_items(&mut doc, outlines_id, outline, &page_ids) {
            outlines.set("First", first);
            outlines.set("Last", last);
        }
        doc.objects.insert(outlines_id, Object::Dictionary(outlines));
        set_outlines(&mut doc, catalog_id, outlines_id);
    }

    doc.save(path).expect("write fixture pdf");
}

/// Write a PDF whose outline's first item is not a dictionary.
pub fn write_pdf_with_corrupt_outline(path: &Path, pages: usize) {
    let (mut doc, _, catalog_id) = build_document(pages);

    let bogus_item = doc.add_object(Object::Integer(42));
    let outlines_id = doc.add_object(dictionary! {
        "Type" => "Outlines",
        "First" => bogus_item,
        "Last" => bogus_item,
    });
    set_outlines(&mut doc, catalog_id, outlines_id);

    doc.save(path).expect("write fixture pdf");
}

/// Page markers of an exported PDF, in page order.
pub fn page_markers(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("load exported pdf");
    doc.get_pages()
        .values()
        .map(|id| {
            doc.get_object(*id)
                .and_then(Object::as_dict)
                .and_then(|page| page.get(b"Marker"))
                .and_then(Object::as_i64)
                .expect("page marker")
        })
        .collect()
}
