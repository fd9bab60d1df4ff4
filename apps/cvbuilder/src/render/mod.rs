//! Rendering Engine: turns (template, document, customization, page, mode) into a
//! visual tree.
//!
//! Rendering is a pure function of its inputs. `Interactive` and `Print` produce the
//! same sections, nodes and text; only `chrome` and the page overlay differ, and they
//! exist only in `Interactive` mode.

pub mod sections;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::models::customization::{Customization, ResolvedStyle};
use crate::models::document::{Document, Page, PageId, SectionId};
use crate::render::sections::RendererRegistry;
use crate::sections::catalog;
use crate::render::text::plain_text;
use crate::templates::{LayoutMode, Template};

pub use text::Inline;

/// Sections placed in the main column of a two-column template.
pub const LEFT_COLUMN: &[&str] = &[
    "summary",
    "experience",
    "education",
    "projects",
    "achievements",
    "publications",
    "volunteer",
];

/// Sections placed in the sidebar of a two-column template (custom sections too).
pub const RIGHT_COLUMN: &[&str] = &["skills", "languages", "certifications", "interests"];

// ────────────────────────────────────────────────────────────────────────────
// Visual tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Interactive,
    Print,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The person's full name.
    Name(String),
    /// Professional title under the name.
    Subtitle(String),
    /// Email / phone / location line.
    Contact(Vec<String>),
    ItemTitle(String),
    /// Secondary line: company, dates, issuer.
    Meta(String),
    Paragraph(Vec<Inline>),
    Tags(Vec<String>),
}

impl Node {
    pub fn plain_text(&self) -> String {
        match self {
            Node::Name(t) | Node::Subtitle(t) | Node::ItemTitle(t) | Node::Meta(t) => t.clone(),
            Node::Contact(items) => items.join(" | "),
            Node::Paragraph(inlines) => plain_text(inlines),
            Node::Tags(tags) => tags.join(", "),
        }
    }
}

/// Editing affordances shown around a section in the interactive preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    DragHandle,
    MoveUp,
    MoveDown,
    Edit,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub id: SectionId,
    /// `None` for the header block.
    pub title: Option<String>,
    pub nodes: Vec<Node>,
    /// Badge next to the title in the interactive preview.
    pub icon: Option<String>,
    pub chrome: Vec<Chrome>,
}

impl SectionView {
    pub fn titled(id: SectionId, title: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            nodes,
            icon: None,
            chrome: Vec::new(),
        }
    }

    pub fn plain_text(&self) -> String {
        let mut lines: Vec<String> = self.title.iter().cloned().collect();
        lines.extend(self.nodes.iter().map(Node::plain_text));
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub page_id: PageId,
    /// 1-based position in the document.
    pub page_number: usize,
    pub page_count: usize,
    pub mode: RenderMode,
    pub layout: LayoutMode,
    pub style: ResolvedStyle,
    /// Always full width, above the columns.
    pub header: Option<SectionView>,
    /// Single-column: every other section in page order. Two-column: the left column.
    pub main: Vec<SectionView>,
    /// Two-column only.
    pub sidebar: Vec<SectionView>,
    /// "Page N of M" overlay; interactive only.
    pub overlay: Option<String>,
}

impl RenderedPage {
    pub fn sections(&self) -> impl Iterator<Item = &SectionView> {
        self.header
            .iter()
            .chain(self.main.iter())
            .chain(self.sidebar.iter())
    }

    pub fn section(&self, id: &str) -> Option<&SectionView> {
        self.sections().find(|s| s.id == id)
    }

    /// Text content of the page, independent of chrome.
    pub fn plain_text(&self) -> String {
        self.sections()
            .map(SectionView::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Everything a section renderer may look at.
pub struct RenderContext<'a> {
    pub template: &'a Template,
    pub document: &'a Document,
    pub style: &'a ResolvedStyle,
    pub page: &'a Page,
    pub mode: RenderMode,
    /// True when `page` is the first page listing `header`.
    pub primary_header: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Renderer {
    registry: RendererRegistry,
}

impl Renderer {
    pub fn new(registry: RendererRegistry) -> Self {
        Self { registry }
    }

    /// Renders one page. `None` if the page does not exist.
    pub fn render(
        &self,
        template: &Template,
        document: &Document,
        customization: &Customization,
        page_id: PageId,
        mode: RenderMode,
    ) -> Option<RenderedPage> {
        let index = document.page_index(page_id)?;
        let page = &document.pages[index];
        let style = customization.resolve(template);
        let ctx = RenderContext {
            template,
            document,
            style: &style,
            page,
            mode,
            primary_header: document.primary_header_page() == Some(page_id),
        };

        let mut header = None;
        let mut main = Vec::new();
        let mut sidebar = Vec::new();
        let last = page.sections.len().saturating_sub(1);

        for (position, id) in page.sections.iter().enumerate() {
            if id.is_header() && header.is_some() {
                continue;
            }
            let mut view = self.registry.render_section(&ctx, id);
            if mode == RenderMode::Interactive {
                view.chrome = chrome_for(id, position, last);
                if !id.is_header() {
                    view.icon = Some(catalog::icon(document, id));
                }
            }

            if id.is_header() {
                header = Some(view);
            } else if template.layout == LayoutMode::TwoColumn && in_sidebar(id) {
                sidebar.push(view);
            } else {
                main.push(view);
            }
        }

        let page_count = document.pages.len();
        let overlay = (mode == RenderMode::Interactive)
            .then(|| format!("Page {} of {}", index + 1, page_count));

        Some(RenderedPage {
            page_id,
            page_number: index + 1,
            page_count,
            mode,
            layout: template.layout,
            style,
            header,
            main,
            sidebar,
            overlay,
        })
    }

    /// Renders every page in document order.
    pub fn render_all(
        &self,
        template: &Template,
        document: &Document,
        customization: &Customization,
        mode: RenderMode,
    ) -> Vec<RenderedPage> {
        document
            .pages
            .iter()
            .filter_map(|p| self.render(template, document, customization, p.id, mode))
            .collect()
    }
}

/// Renders with the standard registry.
pub fn render(
    template: &Template,
    document: &Document,
    customization: &Customization,
    page_id: PageId,
    mode: RenderMode,
) -> Option<RenderedPage> {
    Renderer::default().render(template, document, customization, page_id, mode)
}

fn in_sidebar(id: &SectionId) -> bool {
    id.is_custom() || RIGHT_COLUMN.contains(&id.as_str())
}

fn chrome_for(id: &SectionId, position: usize, last: usize) -> Vec<Chrome> {
    let mut chrome = vec![Chrome::DragHandle, Chrome::Edit];
    if position > 0 {
        chrome.push(Chrome::MoveUp);
    }
    if position < last {
        chrome.push(Chrome::MoveDown);
    }
    if !id.is_header() {
        chrome.push(Chrome::Remove);
    }
    chrome
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
