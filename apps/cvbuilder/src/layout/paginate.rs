//! Overflow pagination: moving sections off a page whose content exceeds the
//! printable budget, and the manual "redistribute all" re-chunking.
//!
//! Neither operation ever adds or drops a section id; only page boundaries move.
//! A split runs once per check. If a page it creates is still too tall, that page
//! is handled by the next check.

use tracing::{debug, info};

use crate::layout::measure::{MeasureRequest, PageMeasurer};
use crate::models::customization::Customization;
use crate::models::document::{Document, Page, PageId, SectionId};
use crate::templates::Template;

/// Leading sections that always stay on the page being split.
pub const ESSENTIAL_SECTIONS: usize = 2;
/// Max sections per page created by an overflow split.
pub const OVERFLOW_CHUNK: usize = 3;
/// Max sections per page after "redistribute all".
pub const REDISTRIBUTE_CHUNK: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum OverflowVerdict {
    /// Page missing or measurement unavailable; treated as not overflowing.
    Unmeasurable,
    Fits { height: f32 },
    /// Over budget but holding no more than the essential sections.
    Unsplittable { height: f32, sections: usize },
    Split { height: f32, created: Vec<PageId> },
}

impl OverflowVerdict {
    pub fn changed(&self) -> bool {
        matches!(self, OverflowVerdict::Split { .. })
    }
}

/// Measures `page` and splits it when its height exceeds `budget_px`.
pub fn check_overflow(
    document: &mut Document,
    template: &Template,
    customization: &Customization,
    page: PageId,
    measurer: &dyn PageMeasurer,
    budget_px: f32,
) -> OverflowVerdict {
    let request = MeasureRequest {
        template,
        document,
        customization,
        page,
    };
    let Some(height) = measurer.measure(&request) else {
        debug!(page = %page, "measurement unavailable, skipping overflow check");
        return OverflowVerdict::Unmeasurable;
    };
    if height <= budget_px {
        return OverflowVerdict::Fits { height };
    }

    let created = split_page(document, page);
    if created.is_empty() {
        let sections = document.page(page).map_or(0, |p| p.sections.len());
        debug!(page = %page, height, sections, "page over budget but not splittable");
        return OverflowVerdict::Unsplittable { height, sections };
    }
    info!(page = %page, height, budget_px, new_pages = created.len(), "split overflowing page");
    OverflowVerdict::Split { height, created }
}

/// Keeps the first two sections of `page` and moves the rest, in order, onto
/// new pages of at most three sections each. New pages take ids `max + 1`,
/// `max + 2`, ... and are inserted directly after `page` rather than appended
/// at the end of the document, so moved sections keep their reading order
/// ahead of any later pages. Returns the new ids; empty when the page has two
/// sections or fewer or does not exist.
pub fn split_page(document: &mut Document, page: PageId) -> Vec<PageId> {
    let Some(index) = document.page_index(page) else {
        return Vec::new();
    };
    if document.pages[index].sections.len() <= ESSENTIAL_SECTIONS {
        return Vec::new();
    }

    let moved: Vec<SectionId> = document.pages[index]
        .sections
        .split_off(ESSENTIAL_SECTIONS);
    let mut next = document.next_page_id().0;
    let new_pages: Vec<Page> = moved
        .chunks(OVERFLOW_CHUNK)
        .map(|chunk| {
            let id = PageId(next);
            next += 1;
            Page::new(id, chunk.to_vec())
        })
        .collect();
    let created = new_pages.iter().map(|p| p.id).collect();

    let tail = document.pages.split_off(index + 1);
    document.pages.extend(new_pages);
    document.pages.extend(tail);
    created
}

/// Flattens every page's sections in document order and re-chunks them into
/// pages of at most four.
///
/// Existing page ids are reused front to back so that a second run is a no-op.
/// Extra pages get fresh ids; leftover pages would be empty and are dropped. A
/// document with no sections keeps a single empty page.
pub fn redistribute_all(document: &mut Document) {
    let all = document.all_section_ids();
    let ids: Vec<PageId> = document.pages.iter().map(|p| p.id).collect();
    let mut next = document.next_page_id().0;

    let mut chunks: Vec<Vec<SectionId>> = all
        .chunks(REDISTRIBUTE_CHUNK)
        .map(<[SectionId]>::to_vec)
        .collect();
    if chunks.is_empty() {
        chunks.push(Vec::new());
    }

    let mut pages = Vec::with_capacity(chunks.len());
    for (i, sections) in chunks.into_iter().enumerate() {
        let id = match ids.get(i) {
            Some(id) => *id,
            None => {
                let id = PageId(next);
                next += 1;
                id
            }
        };
        pages.push(Page::new(id, sections));
    }

    info!(
        before = document.pages.len(),
        after = pages.len(),
        sections = all.len(),
        "redistributed sections"
    );
    document.pages = pages;
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::SyntheticMeasurer;
    use crate::templates;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const BUDGET: f32 = 971.0;

    fn ids(list: &[&str]) -> Vec<SectionId> {
        list.iter().map(|s| SectionId::new(*s)).collect()
    }

    fn make_document(pages: Vec<Vec<&str>>) -> Document {
        let mut doc = Document::new(templates::find("modern").unwrap());
        doc.pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, s)| Page::new(PageId(i as u32 + 1), ids(&s)))
            .collect();
        doc
    }

    fn sorted_sections(doc: &Document) -> Vec<SectionId> {
        let mut all = doc.all_section_ids();
        all.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        all
    }

    fn check(doc: &mut Document, page: PageId, measurer: &SyntheticMeasurer) -> OverflowVerdict {
        let template = templates::find("modern").unwrap();
        let c = Customization::from_template(template);
        check_overflow(doc, template, &c, page, measurer, BUDGET)
    }

    // ── overflow split ──────────────────────────────────────────────────────

    #[test]
    fn test_overflow_chunks_into_threes() {
        let mut doc = make_document(vec![vec![
            "header", "summary", "a", "b", "c", "d", "e",
        ]]);
        let m = SyntheticMeasurer::new().with(PageId(1), 1500.0);
        let verdict = check(&mut doc, PageId(1), &m);

        assert_eq!(
            verdict,
            OverflowVerdict::Split {
                height: 1500.0,
                created: vec![PageId(2), PageId(3)]
            }
        );
        assert_eq!(
            doc.pages,
            vec![
                Page::new(PageId(1), ids(&["header", "summary"])),
                Page::new(PageId(2), ids(&["a", "b", "c"])),
                Page::new(PageId(3), ids(&["d", "e"])),
            ]
        );
    }

    #[test]
    fn test_new_ids_start_above_max_existing() {
        let mut doc = make_document(vec![vec!["header", "summary", "a", "b"]]);
        doc.pages.push(Page::new(PageId(7), ids(&["z"])));
        let m = SyntheticMeasurer::new().with(PageId(1), 2000.0);
        check(&mut doc, PageId(1), &m);
        let order: Vec<u32> = doc.pages.iter().map(|p| p.id.0).collect();
        assert_eq!(order, vec![1, 8, 7]);
    }

    #[test]
    fn test_two_sections_never_split() {
        let mut doc = make_document(vec![vec!["header", "experience"]]);
        let before = doc.pages.clone();
        let m = SyntheticMeasurer::new().with(PageId(1), 5000.0);
        let verdict = check(&mut doc, PageId(1), &m);
        assert_eq!(
            verdict,
            OverflowVerdict::Unsplittable {
                height: 5000.0,
                sections: 2
            }
        );
        assert_eq!(doc.pages, before);
    }

    #[test]
    fn test_budget_is_strict_upper_bound() {
        let mut doc = make_document(vec![vec!["header", "summary", "a"]]);
        let m = SyntheticMeasurer::new().with(PageId(1), BUDGET);
        assert_eq!(
            check(&mut doc, PageId(1), &m),
            OverflowVerdict::Fits { height: BUDGET }
        );
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn test_unmeasurable_page_is_left_alone() {
        let mut doc = make_document(vec![vec!["header", "summary", "a", "b"]]);
        let before = doc.pages.clone();
        let verdict = check(&mut doc, PageId(1), &SyntheticMeasurer::new());
        assert_eq!(verdict, OverflowVerdict::Unmeasurable);
        assert!(!verdict.changed());
        assert_eq!(doc.pages, before);
    }

    #[test]
    fn test_later_page_without_header_keeps_first_two() {
        let mut doc = make_document(vec![
            vec!["header", "summary"],
            vec!["skills", "projects", "languages", "interests"],
        ]);
        let m = SyntheticMeasurer::new().with(PageId(2), 1200.0);
        check(&mut doc, PageId(2), &m);
        assert_eq!(doc.page(PageId(2)).unwrap().sections, ids(&["skills", "projects"]));
        assert_eq!(doc.page(PageId(3)).unwrap().sections, ids(&["languages", "interests"]));
    }

    #[test]
    fn test_repeated_checks_converge() {
        let mut doc = make_document(vec![vec!["header", "summary", "a", "b", "c", "d"]]);
        let mut m = SyntheticMeasurer::new();
        for id in 1..10 {
            m.set(PageId(id), 3000.0);
        }
        for _ in 0..5 {
            let pages: Vec<PageId> = doc.pages.iter().map(|p| p.id).collect();
            for page in pages {
                check(&mut doc, page, &m);
            }
        }
        assert!(doc.pages.iter().all(|p| p.sections.len() <= ESSENTIAL_SECTIONS));
        assert_eq!(doc.all_section_ids().len(), 6);
    }

    // ── redistribute ────────────────────────────────────────────────────────

    #[test]
    fn test_redistribute_chunks_into_fours() {
        let mut doc = make_document(vec![
            vec!["header", "summary", "a"],
            vec!["b", "c", "d", "e", "f"],
            vec![],
        ]);
        redistribute_all(&mut doc);
        assert_eq!(
            doc.pages,
            vec![
                Page::new(PageId(1), ids(&["header", "summary", "a", "b"])),
                Page::new(PageId(2), ids(&["c", "d", "e", "f"])),
            ]
        );
    }

    #[test]
    fn test_redistribute_adds_pages_with_fresh_ids() {
        let mut doc = make_document(vec![vec![
            "header", "summary", "a", "b", "c", "d", "e", "f", "g",
        ]]);
        redistribute_all(&mut doc);
        let order: Vec<u32> = doc.pages.iter().map(|p| p.id.0).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(doc.pages[2].sections, ids(&["g"]));
    }

    #[test]
    fn test_redistribute_empty_document_keeps_one_page() {
        let mut doc = make_document(vec![vec![], vec![]]);
        redistribute_all(&mut doc);
        assert_eq!(doc.pages, vec![Page::new(PageId(1), Vec::new())]);
    }

    // ── properties ──────────────────────────────────────────────────────────

    fn arb_pages() -> impl Strategy<Value = Vec<Vec<String>>> {
        prop::collection::vec(
            prop::collection::vec("[a-e]{1,2}", 0..9),
            1..5,
        )
    }

    fn from_arb(pages: &[Vec<String>]) -> Document {
        let mut doc = Document::new(templates::find("modern").unwrap());
        doc.pages = pages
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Page::new(
                    PageId(i as u32 + 1),
                    s.iter().map(|id| SectionId::new(id.as_str())).collect(),
                )
            })
            .collect();
        doc
    }

    proptest! {
        /// Splitting moves sections but never adds or drops any.
        #[test]
        fn split_conserves_sections(pages in arb_pages(), target in 0usize..5) {
            let mut doc = from_arb(&pages);
            let before = sorted_sections(&doc);
            let page = PageId((target % doc.pages.len()) as u32 + 1);
            split_page(&mut doc, page);
            prop_assert_eq!(sorted_sections(&doc), before);
        }

        /// Split output keeps document order of sections.
        #[test]
        fn split_preserves_order(pages in arb_pages()) {
            let mut doc = from_arb(&pages);
            let before = doc.all_section_ids();
            split_page(&mut doc, PageId(1));
            prop_assert_eq!(doc.all_section_ids(), before);
        }

        #[test]
        fn redistribute_conserves_sections(pages in arb_pages()) {
            let mut doc = from_arb(&pages);
            let before = doc.all_section_ids();
            redistribute_all(&mut doc);
            prop_assert_eq!(doc.all_section_ids(), before);
            prop_assert!(doc.pages.iter().all(|p| p.sections.len() <= REDISTRIBUTE_CHUNK));
            prop_assert!(!doc.pages.is_empty());
        }

        #[test]
        fn redistribute_is_idempotent(pages in arb_pages()) {
            let mut doc = from_arb(&pages);
            redistribute_all(&mut doc);
            let once = doc.pages.clone();
            redistribute_all(&mut doc);
            prop_assert_eq!(doc.pages, once);
        }

        #[test]
        fn page_ids_stay_unique(pages in arb_pages(), target in 0usize..5) {
            let mut doc = from_arb(&pages);
            let page = PageId((target % doc.pages.len()) as u32 + 1);
            split_page(&mut doc, page);
            redistribute_all(&mut doc);
            let mut seen: Vec<PageId> = doc.pages.iter().map(|p| p.id).collect();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), doc.pages.len());
        }
    }
}
