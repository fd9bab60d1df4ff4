//! Text flow: positions every line of a rendered page inside the printable area.
//!
//! The same flow backs the height estimate used for overflow checks and the PDF
//! exporter, so what gets measured is what gets printed. Units are CSS pixels at
//! 96 dpi, measured from the top-left corner of the content area.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontClass};
use crate::render::{Node, RenderedPage, SectionView};
use crate::render::text::visual_lines;
use crate::templates::LayoutMode;

pub const LINE_HEIGHT: f32 = 1.4;
/// Main column share of the content width in two-column layouts.
pub const MAIN_COLUMN_FRACTION: f32 = 0.62;
pub const COLUMN_GAP_FRACTION: f32 = 0.04;

// ────────────────────────────────────────────────────────────────────────────
// Page format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFormat {
    pub width_px: f32,
    pub height_px: f32,
    pub margin_px: f32,
}

impl PageFormat {
    /// 210mm × 297mm with 20mm margins.
    pub const A4: PageFormat = PageFormat {
        width_px: 793.7,
        height_px: 1122.5,
        margin_px: 75.6,
    };

    pub fn content_width(&self) -> f32 {
        self.width_px - 2.0 * self.margin_px
    }

    pub fn content_height(&self) -> f32 {
        self.height_px - 2.0 * self.margin_px
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        PageFormat::A4
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flow output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextRole {
    Name,
    Subtitle,
    Contact,
    SectionTitle,
    ItemTitle,
    Meta,
    Body,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLine {
    pub text: String,
    pub role: TextRole,
    pub x: f32,
    /// Top edge of the line box.
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub font: FontClass,
    /// `#rrggbb` as resolved from the page style.
    pub color: String,
}

impl FlowLine {
    /// Baseline position, roughly 80% down the line box.
    pub fn baseline(&self) -> f32 {
        self.y + self.size * (LINE_HEIGHT - 1.0) / 2.0 + self.size * 0.8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFlow {
    pub lines: Vec<FlowLine>,
    /// Total content height in px.
    pub height: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Flow
// ────────────────────────────────────────────────────────────────────────────

struct RoleStyle {
    scale: f32,
    bold: bool,
    heading_font: bool,
    color: ColorRole,
    space_before: f32,
    space_after: f32,
}

enum ColorRole {
    Primary,
    Secondary,
    Text,
}

fn role_style(role: TextRole) -> RoleStyle {
    let (scale, bold, heading_font, color, space_before, space_after) = match role {
        TextRole::Name => (2.0, true, true, ColorRole::Primary, 0.0, 0.25),
        TextRole::Subtitle => (1.125, false, false, ColorRole::Secondary, 0.0, 0.25),
        TextRole::Contact => (0.875, false, false, ColorRole::Text, 0.0, 0.5),
        TextRole::SectionTitle => (1.25, true, true, ColorRole::Primary, 0.75, 0.25),
        TextRole::ItemTitle => (1.0, true, false, ColorRole::Text, 0.35, 0.0),
        TextRole::Meta => (0.875, false, false, ColorRole::Secondary, 0.0, 0.0),
        TextRole::Body => (1.0, false, false, ColorRole::Text, 0.0, 0.15),
        TextRole::Tags => (0.875, false, false, ColorRole::Text, 0.0, 0.15),
    };
    RoleStyle {
        scale,
        bold,
        heading_font,
        color,
        space_before,
        space_after,
    }
}

struct Column<'a> {
    page: &'a RenderedPage,
    x: f32,
    width: f32,
    y: f32,
    lines: Vec<FlowLine>,
}

impl<'a> Column<'a> {
    fn new(page: &'a RenderedPage, x: f32, width: f32, y: f32) -> Self {
        Self {
            page,
            x,
            width,
            y,
            lines: Vec::new(),
        }
    }

    fn push_text(&mut self, role: TextRole, text: &str) {
        let style = role_style(role);
        let base = f32::from(self.page.style.font_size);
        let size = base * style.scale;
        let family = if style.heading_font {
            &self.page.style.heading_font
        } else {
            &self.page.style.body_font
        };
        let font = FontClass::from_css(family);
        let color = match style.color {
            ColorRole::Primary => &self.page.style.primary,
            ColorRole::Secondary => &self.page.style.secondary,
            ColorRole::Text => &self.page.style.text,
        };

        self.y += base * style.space_before;
        let metrics = get_metrics(font);
        for visual in text.split('\n') {
            let wrapped = metrics.wrap(visual, self.width / size, style.bold);
            if wrapped.is_empty() {
                // Blank visual line still takes a line box.
                self.y += size * LINE_HEIGHT;
                continue;
            }
            for line in wrapped {
                self.lines.push(FlowLine {
                    text: line,
                    role,
                    x: self.x,
                    y: self.y,
                    size,
                    bold: style.bold,
                    font,
                    color: color.clone(),
                });
                self.y += size * LINE_HEIGHT;
            }
        }
        self.y += base * style.space_after;
    }

    fn push_section(&mut self, section: &SectionView) {
        if let Some(title) = &section.title {
            self.push_text(TextRole::SectionTitle, title);
        }
        for node in &section.nodes {
            match node {
                Node::Name(t) => self.push_text(TextRole::Name, t),
                Node::Subtitle(t) => self.push_text(TextRole::Subtitle, t),
                Node::Contact(items) => self.push_text(TextRole::Contact, &items.join("  |  ")),
                Node::ItemTitle(t) => self.push_text(TextRole::ItemTitle, t),
                Node::Meta(t) => self.push_text(TextRole::Meta, t),
                Node::Paragraph(inlines) => {
                    self.push_text(TextRole::Body, &visual_lines(inlines).join("\n"))
                }
                Node::Tags(tags) => self.push_text(TextRole::Tags, &tags.join(", ")),
            }
        }
        self.y += f32::from(self.page.style.font_size) * 0.5;
    }
}

/// Lays out a rendered page. Chrome and overlays take no space.
pub fn flow_page(page: &RenderedPage, format: &PageFormat) -> PageFlow {
    let width = format.content_width();
    let mut header = Column::new(page, 0.0, width, 0.0);
    if let Some(view) = &page.header {
        header.push_section(view);
    }
    let top = header.y;
    let mut lines = header.lines;

    let height = match page.layout {
        LayoutMode::SingleColumn => {
            let mut main = Column::new(page, 0.0, width, top);
            for view in page.main.iter().chain(page.sidebar.iter()) {
                main.push_section(view);
            }
            lines.extend(main.lines);
            main.y
        }
        LayoutMode::TwoColumn => {
            let main_width = width * MAIN_COLUMN_FRACTION;
            let side_x = main_width + width * COLUMN_GAP_FRACTION;
            let mut main = Column::new(page, 0.0, main_width, top);
            let mut side = Column::new(page, side_x, width - side_x, top);
            for view in &page.main {
                main.push_section(view);
            }
            for view in &page.sidebar {
                side.push_section(view);
            }
            let height = main.y.max(side.y);
            lines.extend(main.lines);
            lines.extend(side.lines);
            height
        }
    };

    PageFlow { lines, height }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{Document, Experience, PageId};
    use crate::models::Customization;
    use crate::render::{render, RenderMode};
    use crate::templates;

    fn flow(template_id: &str, doc: &Document, mode: RenderMode) -> PageFlow {
        let template = templates::find(template_id).unwrap();
        let page = render(template, doc, &Customization::default(), PageId(1), mode).unwrap();
        flow_page(&page, &PageFormat::A4)
    }

    #[test]
    fn test_a4_content_area() {
        assert!((PageFormat::A4.content_height() - 971.3).abs() < 0.1);
        assert!(PageFormat::A4.content_width() > 600.0);
    }

    #[test]
    fn test_lines_stay_inside_content_width() {
        let template = templates::find("modern").unwrap();
        let mut doc = Document::new(template);
        doc.experience.push(Experience {
            description: "word ".repeat(200),
            ..Default::default()
        });
        let f = flow("modern", &doc, RenderMode::Print);
        assert!(f.lines.iter().all(|l| l.x >= 0.0 && l.x < PageFormat::A4.content_width()));
        assert!(f.lines.iter().filter(|l| l.role == TextRole::Body).count() > 3);
    }

    #[test]
    fn test_more_content_is_taller() {
        let template = templates::find("modern").unwrap();
        let short = Document::new(template);
        let mut long = short.clone();
        for _ in 0..10 {
            long.experience.push(Experience {
                job_title: "Engineer".into(),
                description: "Shipped features\nFixed bugs".into(),
                ..Default::default()
            });
        }
        let a = flow("modern", &short, RenderMode::Print).height;
        let b = flow("modern", &long, RenderMode::Print).height;
        assert!(b > a, "{b} should exceed {a}");
    }

    #[test]
    fn test_interactive_and_print_heights_match() {
        let template = templates::find("creative").unwrap();
        let doc = Document::new(template);
        let a = flow("creative", &doc, RenderMode::Interactive);
        let b = flow("creative", &doc, RenderMode::Print);
        assert_eq!(a, b);
    }

    #[test]
    fn test_two_column_sidebar_starts_right_of_main() {
        let template = templates::find("creative").unwrap();
        let doc = Document::new(template);
        let f = flow("creative", &doc, RenderMode::Print);
        let skill_tags = f.lines.iter().find(|l| l.text.contains("Skill 1")).unwrap();
        assert!(skill_tags.x > PageFormat::A4.content_width() * MAIN_COLUMN_FRACTION);
    }

    #[test]
    fn test_blank_visual_line_takes_space() {
        let template = templates::find("minimal").unwrap();
        let mut single = Document::new(template);
        single.experience.push(Experience {
            description: "a\nb".into(),
            ..Default::default()
        });
        let mut spaced = single.clone();
        spaced.experience[0].description = "a\n\nb".into();
        let a = flow("minimal", &single, RenderMode::Print).height;
        let b = flow("minimal", &spaced, RenderMode::Print).height;
        assert!(b > a);
    }
}
