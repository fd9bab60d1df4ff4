//! Explicit page operations from the page manager panel.

use tracing::debug;

use crate::models::document::{Document, Page, PageId, SectionId};

/// Appends a page with a fresh id. A document without pages gets the
/// conventional `[header, summary]` opener; later pages start empty.
pub fn add_page(document: &mut Document) -> PageId {
    let id = document.next_page_id();
    let sections = if document.pages.is_empty() {
        vec![SectionId::header(), SectionId::new("summary")]
    } else {
        Vec::new()
    };
    document.pages.push(Page::new(id, sections));
    debug!(page = %id, "added page");
    id
}

/// Removes a page. Refused when it is the only page or does not exist.
pub fn remove_page(document: &mut Document, page: PageId) -> bool {
    if document.pages.len() <= 1 {
        return false;
    }
    let Some(index) = document.page_index(page) else {
        return false;
    };
    document.pages.remove(index);
    debug!(page = %page, "removed page");
    true
}

/// Appends a copy of `page`'s section list under a fresh id.
pub fn duplicate_page(document: &mut Document, page: PageId) -> Option<PageId> {
    let sections = document.page(page)?.sections.clone();
    let id = document.next_page_id();
    document.pages.push(Page::new(id, sections));
    Some(id)
}
