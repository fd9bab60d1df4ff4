//! Editor session: owns the in-memory document and customization for one editing
//! run and wires mutations to the debounced overflow check and the export sequence.
//!
//! All mutation goes through `&mut self`, so the document never needs a lock. The
//! debounce timer runs on its own task but only sends a page id back; the check
//! itself runs when the owner calls [`EditorSession::run_overflow_check`].
//! Mutating methods arm the debounce timer and must be called inside a Tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{BuilderError, ExportError};
use crate::export::{Exporter, PrintSurface};
use crate::layout::debounce::OverflowDebouncer;
use crate::layout::measure::PageMeasurer;
use crate::layout::paginate::{self, OverflowVerdict};
use crate::layout::DEFAULT_PAGE_BUDGET_PX;
use crate::models::customization::{ColorSlot, Customization, FontSlot};
use crate::models::document::{ContentType, Document, PageId, PersonalInfo, SectionId};
use crate::render::{RenderMode, RenderedPage, Renderer};
use crate::sections::catalog::CatalogEntry;
use crate::sections::{self, pages, SectionDescriptor, SectionDraft};
use crate::templates::{self, Template};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Printable content height per page, px.
    pub page_budget_px: f32,
    /// Quiet period after the last mutation before the overflow check fires.
    pub overflow_debounce: Duration,
    /// Fixed wait between print-mode rendering and rasterization.
    pub export_settle: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            page_budget_px: DEFAULT_PAGE_BUDGET_PX,
            overflow_debounce: Duration::from_millis(300),
            export_settle: Duration::from_millis(500),
        }
    }
}

pub struct EditorSession {
    template: &'static Template,
    document: Document,
    current_page: PageId,
    renderer: Renderer,
    measurer: Arc<dyn PageMeasurer>,
    debouncer: OverflowDebouncer,
    checks: mpsc::UnboundedReceiver<PageId>,
    settings: SessionSettings,
    print_surface: Option<PrintSurface>,
}

impl EditorSession {
    /// Starts a fresh document from `template_id`, customization snapshotted from it.
    pub fn new(
        template_id: &str,
        measurer: Arc<dyn PageMeasurer>,
        settings: SessionSettings,
    ) -> Result<Self, BuilderError> {
        let template = templates::find(template_id)
            .ok_or_else(|| BuilderError::UnknownTemplate(template_id.to_string()))?;
        Ok(Self::with_document(template, Document::new(template), measurer, settings))
    }

    /// Resumes editing an existing document with the customization saved in it.
    pub fn open(
        document: Document,
        measurer: Arc<dyn PageMeasurer>,
        settings: SessionSettings,
    ) -> Result<Self, BuilderError> {
        let template = templates::find(&document.template_id)
            .ok_or_else(|| BuilderError::UnknownTemplate(document.template_id.clone()))?;
        Ok(Self::with_document(template, document, measurer, settings))
    }

    fn with_document(
        template: &'static Template,
        document: Document,
        measurer: Arc<dyn PageMeasurer>,
        settings: SessionSettings,
    ) -> Self {
        let (debouncer, checks) = OverflowDebouncer::new(settings.overflow_debounce);
        let current_page = document.first_page_id().unwrap_or(PageId(1));
        info!(
            template = template.id,
            document = %document.id,
            pages = document.pages.len(),
            "editor session started"
        );
        Self {
            template,
            document,
            current_page,
            renderer: Renderer::default(),
            measurer,
            debouncer,
            checks,
            settings,
            print_surface: None,
        }
    }

    pub fn template(&self) -> &'static Template {
        self.template
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn customization(&self) -> &Customization {
        &self.document.customization
    }

    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn select_page(&mut self, page: PageId) -> Result<(), BuilderError> {
        if self.document.page(page).is_none() {
            return Err(BuilderError::PageNotFound(page));
        }
        self.current_page = page;
        Ok(())
    }

    // ── section edits ───────────────────────────────────────────────────────

    /// Adds a section to the current page.
    ///
    /// # Panics
    ///
    /// Arms the overflow debounce timer, so it panics outside a Tokio runtime.
    pub fn add_section(&mut self, descriptor: SectionDescriptor) -> Option<SectionId> {
        let added = sections::add_section(&mut self.document, self.current_page, descriptor)?;
        self.schedule_check();
        Some(added)
    }

    pub fn create_custom_section(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        content_type: ContentType,
    ) -> Option<SectionId> {
        self.add_section(SectionDescriptor::NewCustom {
            name: name.into(),
            icon: icon.into(),
            content_type,
        })
    }

    pub fn remove_section(&mut self, section: &SectionId) -> bool {
        let removed = sections::remove_section(&mut self.document, self.current_page, section);
        if removed {
            self.schedule_check();
        }
        removed
    }

    pub fn reorder_section(&mut self, from: usize, to: usize) -> bool {
        let moved = sections::reorder_section(&mut self.document, self.current_page, from, to);
        if moved {
            self.schedule_check();
        }
        moved
    }

    pub fn available_sections(&self) -> Vec<&'static CatalogEntry> {
        sections::list_available_sections(&self.document, self.current_page)
    }

    pub fn edit_section(&self, section: &SectionId) -> Option<SectionDraft> {
        sections::edit_section(&self.document, section)
    }

    pub fn commit_section(&mut self, draft: SectionDraft) -> bool {
        let committed = sections::commit_section(&mut self.document, draft);
        if committed {
            self.schedule_check();
        }
        committed
    }

    /// Form edits to the personal fields.
    ///
    /// # Panics
    ///
    /// Arms the overflow debounce timer, so it panics outside a Tokio runtime.
    pub fn update_personal_info(&mut self, edit: impl FnOnce(&mut PersonalInfo)) {
        edit(&mut self.document.personal_info);
        self.schedule_check();
    }

    // ── pages ───────────────────────────────────────────────────────────────

    /// Appends a page and makes it current.
    pub fn add_page(&mut self) -> PageId {
        let page = pages::add_page(&mut self.document);
        self.current_page = page;
        page
    }

    /// Removing the current page moves the selection to the first page.
    pub fn remove_page(&mut self, page: PageId) -> bool {
        if !pages::remove_page(&mut self.document, page) {
            return false;
        }
        if self.current_page == page {
            self.current_page = self.document.first_page_id().unwrap_or(PageId(1));
        }
        self.schedule_check();
        true
    }

    pub fn duplicate_page(&mut self, page: PageId) -> Option<PageId> {
        let copy = pages::duplicate_page(&mut self.document, page)?;
        self.schedule_check();
        Some(copy)
    }

    /// Destructive re-chunking of every section; only ever run on request.
    pub fn redistribute_all(&mut self) {
        paginate::redistribute_all(&mut self.document);
        if self.document.page(self.current_page).is_none() {
            self.current_page = self.document.first_page_id().unwrap_or(PageId(1));
        }
        self.schedule_check();
    }

    // ── customization ───────────────────────────────────────────────────────

    pub fn set_color(&mut self, slot: ColorSlot, value: &str) -> bool {
        let applied = self.document.customization.set_color(self.template, slot, value);
        if !applied {
            debug!(?slot, value, template = self.template.id, "color rejected");
        }
        applied
    }

    pub fn set_font(&mut self, slot: FontSlot, value: &str) -> bool {
        let applied = self.document.customization.set_font(self.template, slot, value);
        if applied {
            self.schedule_check();
        }
        applied
    }

    pub fn set_font_size(&mut self, size: u8) -> u8 {
        let applied = self.document.customization.set_font_size(size);
        self.schedule_check();
        applied
    }

    pub fn reset_customization(&mut self) {
        self.document.customization.reset(self.template);
        self.schedule_check();
    }

    // ── rendering & overflow ────────────────────────────────────────────────

    pub fn render_page(&self, page: PageId, mode: RenderMode) -> Option<RenderedPage> {
        self.renderer
            .render(self.template, &self.document, &self.document.customization, page, mode)
    }

    /// Live preview of the current page.
    pub fn render_current(&self) -> Option<RenderedPage> {
        self.render_page(self.current_page, RenderMode::Interactive)
    }

    pub fn overflow_check_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Waits for the debounce timer to fire and returns the page to check.
    pub async fn next_overflow_check(&mut self) -> Option<PageId> {
        self.checks.recv().await
    }

    pub fn run_overflow_check(&mut self, page: PageId) -> OverflowVerdict {
        let customization = self.document.customization.clone();
        paginate::check_overflow(
            &mut self.document,
            self.template,
            &customization,
            page,
            self.measurer.as_ref(),
            self.settings.page_budget_px,
        )
    }

    /// Runs up to `max_cycles` passes of overflow checks over every page, stopping
    /// at the first pass that changes nothing. Returns the number of splits.
    pub fn settle_layout(&mut self, max_cycles: usize) -> usize {
        let mut splits = 0;
        for cycle in 0..max_cycles {
            let ids: Vec<PageId> = self.document.pages.iter().map(|p| p.id).collect();
            let mut changed = false;
            for page in ids {
                if self.run_overflow_check(page).changed() {
                    changed = true;
                    splits += 1;
                }
            }
            if !changed {
                debug!(cycle, splits, "layout settled");
                return splits;
            }
        }
        warn!(max_cycles, splits, "layout did not settle within the cycle limit");
        splits
    }

    fn schedule_check(&mut self) {
        self.debouncer.schedule(self.current_page);
    }

    // ── export ──────────────────────────────────────────────────────────────

    /// Print-mode render of every page, fixed settle delay, then hand-off to the
    /// exporter. The print surface is discarded on both success and failure.
    pub async fn export(&mut self, exporter: &dyn Exporter) -> Result<Bytes, ExportError> {
        let rendered = self.renderer.render_all(
            self.template,
            &self.document,
            &self.document.customization,
            RenderMode::Print,
        );
        let surface = self.print_surface.insert(PrintSurface::new(rendered));
        let page_count = surface.pages().len();

        tokio::time::sleep(self.settings.export_settle).await;

        let result = match &self.print_surface {
            Some(surface) => exporter.export(surface.pages()).await,
            None => Err(ExportError::Empty),
        };
        self.print_surface = None;

        match &result {
            Ok(bytes) => info!(pages = page_count, bytes = bytes.len(), "export finished"),
            Err(e) => warn!(error = %e, "export aborted"),
        }
        result
    }

    pub fn has_print_surface(&self) -> bool {
        self.print_surface.is_some()
    }

    /// Leaving the editor: drop any pending overflow check and a leftover print surface.
    pub fn leave(&mut self) {
        self.debouncer.cancel();
        while self.checks.try_recv().is_ok() {}
        if self.print_surface.take().is_some() {
            debug!("discarded print surface on leave");
        }
        info!(document = %self.document.id, "left editor");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::PdfExporter;
    use crate::layout::measure::SyntheticMeasurer;
    use crate::models::document::Experience;
    use crate::render::Chrome;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Records what it was handed; fails on demand.
    #[derive(Default)]
    struct RecordingExporter {
        fail: bool,
        seen: Mutex<Vec<(PageId, RenderMode, bool)>>,
        called_at: Mutex<Option<Instant>>,
    }

    #[async_trait]
    impl Exporter for RecordingExporter {
        async fn export(&self, pages: &[RenderedPage]) -> Result<Bytes, ExportError> {
            *self.called_at.lock().unwrap() = Some(Instant::now());
            let mut seen = self.seen.lock().unwrap();
            for p in pages {
                let has_chrome = p.sections().any(|s| !s.chrome.is_empty());
                seen.push((p.page_id, p.mode, has_chrome));
            }
            if self.fail {
                return Err(ExportError::Rasterize {
                    page_id: pages[0].page_id,
                    reason: "canvas unavailable".into(),
                });
            }
            Ok(Bytes::from_static(b"%PDF"))
        }
    }

    fn settings() -> SessionSettings {
        SessionSettings {
            page_budget_px: 971.0,
            overflow_debounce: Duration::from_millis(300),
            export_settle: Duration::from_millis(500),
        }
    }

    fn make_session(measurer: SyntheticMeasurer) -> EditorSession {
        EditorSession::new("modern", Arc::new(measurer), settings()).unwrap()
    }

    fn long_first_page(session: &mut EditorSession) {
        for id in ["projects", "languages", "certifications", "achievements"] {
            session
                .add_section(sections::manager::predefined(id).unwrap())
                .unwrap();
        }
    }

    // ── construction ────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_template_is_an_error() {
        let err = EditorSession::new("retro", Arc::new(SyntheticMeasurer::new()), settings())
            .err()
            .unwrap();
        assert!(matches!(err, BuilderError::UnknownTemplate(id) if id == "retro"));
    }

    #[test]
    fn test_customization_snapshots_template() {
        let session = EditorSession::new("classic", Arc::new(SyntheticMeasurer::new()), settings())
            .unwrap();
        assert_eq!(session.customization().colors.primary.as_deref(), Some("#374151"));
        assert_eq!(session.current_page(), PageId(1));
    }

    #[test]
    fn test_selecting_missing_page_is_an_error() {
        let mut session = make_session(SyntheticMeasurer::new());
        let err = session.select_page(PageId(9)).unwrap_err();
        assert!(matches!(err, BuilderError::PageNotFound(PageId(9))));
        assert_eq!(session.current_page(), PageId(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopened_document_keeps_customization() {
        let mut session = make_session(SyntheticMeasurer::new());
        assert!(session.set_color(ColorSlot::Primary, "#ef4444"));
        session.set_font_size(13);
        let json = session.document().to_json_pretty().unwrap();
        session.leave();

        let document = Document::from_json(&json).unwrap();
        let reopened =
            EditorSession::open(document, Arc::new(SyntheticMeasurer::new()), settings()).unwrap();
        assert_eq!(reopened.customization().colors.primary.as_deref(), Some("#ef4444"));
        assert_eq!(reopened.customization().font_size, 13);
        let page = reopened.render_page(PageId(1), RenderMode::Print).unwrap();
        assert_eq!(page.style.primary, "#ef4444");
        assert_eq!(page.style.font_size, 13);
    }

    // ── debounced overflow ──────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_yields_single_check() {
        let mut session = make_session(SyntheticMeasurer::new().with(PageId(1), 1400.0));
        long_first_page(&mut session);
        session.update_personal_info(|p| p.name = "Linus".into());
        assert!(session.overflow_check_pending());

        let page = session.next_overflow_check().await.unwrap();
        assert_eq!(page, PageId(1));
        let verdict = session.run_overflow_check(page);
        assert!(verdict.changed());
        assert_eq!(session.document().pages[0].sections.len(), 2);

        let again = tokio::time::timeout(Duration::from_secs(2), session.next_overflow_check()).await;
        assert!(again.is_err(), "only one check per burst");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmeasurable_page_never_splits() {
        let mut session = make_session(SyntheticMeasurer::new());
        long_first_page(&mut session);
        let before = session.document().pages.clone();
        let page = session.next_overflow_check().await.unwrap();
        assert_eq!(session.run_overflow_check(page), OverflowVerdict::Unmeasurable);
        assert_eq!(session.document().pages, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leave_cancels_pending_check() {
        let mut session = make_session(SyntheticMeasurer::new().with(PageId(1), 5000.0));
        long_first_page(&mut session);
        session.leave();
        assert!(!session.overflow_check_pending());
        let fired = tokio::time::timeout(Duration::from_secs(2), session.next_overflow_check()).await;
        assert!(fired.is_err());
        assert_eq!(session.document().pages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_layout_converges_over_cycles() {
        let mut measurer = SyntheticMeasurer::new();
        for id in 1..=20 {
            measurer.set(PageId(id), 2000.0);
        }
        let mut session = make_session(measurer);
        long_first_page(&mut session);
        let before = session.document().all_section_ids();

        let splits = session.settle_layout(8);
        assert!(splits >= 2);
        assert!(session.document().pages.iter().all(|p| p.sections.len() <= 2));
        let mut after = session.document().all_section_ids();
        let mut expected = before;
        after.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        expected.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(after, expected);
    }

    // ── page operations ─────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_removing_current_page_selects_first() {
        let mut session = make_session(SyntheticMeasurer::new());
        let added = session.add_page();
        assert_eq!(session.current_page(), added);
        assert!(session.remove_page(added));
        assert_eq!(session.current_page(), PageId(1));
        assert!(!session.remove_page(PageId(1)), "last page stays");
    }

    #[tokio::test(start_paused = true)]
    async fn test_redistribute_is_explicit_and_idempotent() {
        let mut session = make_session(SyntheticMeasurer::new());
        long_first_page(&mut session);
        session.redistribute_all();
        let once = session.document().pages.clone();
        session.redistribute_all();
        assert_eq!(session.document().pages, once);
        assert!(once.iter().all(|p| p.sections.len() <= 4));
    }

    // ── customization ───────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_knobs_follow_template() {
        let mut session =
            EditorSession::new("minimal", Arc::new(SyntheticMeasurer::new()), settings()).unwrap();
        assert!(session.set_color(ColorSlot::Primary, "#ef4444"));
        assert!(!session.set_color(ColorSlot::Background, "#000000"));
        assert!(!session.set_font(FontSlot::Heading, "Georgia, serif"));
        assert_eq!(session.set_font_size(40), 18);
        session.reset_customization();
        assert_eq!(session.customization().colors.primary.as_deref(), Some("#000000"));
        assert_eq!(session.customization().font_size, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_color_keeps_export_working() {
        let mut session = make_session(SyntheticMeasurer::new());
        assert!(!session.set_color(ColorSlot::Primary, "crimson"));
        assert!(session.set_color(ColorSlot::Secondary, "Red"));
        assert_eq!(session.customization().colors.secondary.as_deref(), Some("#ef4444"));

        let bytes = session.export(&PdfExporter::default()).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    // ── export ──────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_export_renders_print_pages_after_settle() {
        let mut session = make_session(SyntheticMeasurer::new());
        session.add_page();
        let exporter = RecordingExporter::default();

        let start = Instant::now();
        let bytes = session.export(&exporter).await.unwrap();

        assert_eq!(&bytes[..], b"%PDF");
        let called = exporter.called_at.lock().unwrap().unwrap();
        assert!(called - start >= Duration::from_millis(500));
        assert_eq!(
            *exporter.seen.lock().unwrap(),
            vec![
                (PageId(1), RenderMode::Print, false),
                (PageId(2), RenderMode::Print, false)
            ]
        );
        assert!(!session.has_print_surface());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_export_discards_surface_and_keeps_document() {
        let mut session = make_session(SyntheticMeasurer::new());
        session.commit_section(SectionDraft::Experience(vec![Experience {
            job_title: "Engineer".into(),
            ..Default::default()
        }]));
        let before = session.document().clone();
        let exporter = RecordingExporter {
            fail: true,
            ..Default::default()
        };
        let err = session.export(&exporter).await.unwrap_err();
        assert!(matches!(err, ExportError::Rasterize { page_id: PageId(1), .. }));
        assert!(!session.has_print_surface());
        assert_eq!(session.document(), &before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preview_keeps_chrome() {
        let mut session = make_session(SyntheticMeasurer::new());
        session.select_page(PageId(1)).unwrap();
        let preview = session.render_current().unwrap();
        assert!(preview.section("summary").unwrap().chrome.contains(&Chrome::Remove));
        assert_eq!(preview.overlay.as_deref(), Some("Page 1 of 1"));
    }
}
