//! PDF exporter: draws the text flow of each print-mode page with the base-14
//! fonts, one physical page per rendered page, in input order.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info};

use crate::errors::ExportError;
use crate::export::Exporter;
use crate::layout::flow::{flow_page, FlowLine, PageFormat};
use crate::layout::font_metrics::FontClass;
use crate::models::customization::parse_hex_color;
use crate::models::document::PageId;
use crate::render::{Node, RenderedPage};

const PT_PER_PX: f32 = 0.75;
const FALLBACK_TITLE: &str = "CV";

pub struct PdfExporter {
    format: PageFormat,
}

impl PdfExporter {
    pub fn new(format: PageFormat) -> Self {
        Self { format }
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(PageFormat::A4)
    }
}

#[async_trait]
impl Exporter for PdfExporter {
    async fn export(&self, pages: &[RenderedPage]) -> Result<Bytes, ExportError> {
        if pages.is_empty() {
            return Err(ExportError::Empty);
        }
        let pages = pages.to_vec();
        let format = self.format;
        // CPU-bound rasterization stays off the async executor.
        let bytes = tokio::task::spawn_blocking(move || build_pdf(&pages, &format)).await??;
        Ok(Bytes::from(bytes))
    }
}

/// Builds the whole PDF in memory. Any page failure aborts the build.
pub fn build_pdf(pages: &[RenderedPage], format: &PageFormat) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let resources_id = add_font_resources(&mut doc);

    let width_pt = format.width_px * PT_PER_PX;
    let height_pt = format.height_px * PT_PER_PX;

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, format)?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Real(width_pt), Object::Real(height_pt)],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
        debug!(page = %page.page_id, number = page.page_number, "rasterized page");
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&document_title(pages)), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("cvbuilder ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    info!(pages = pages.len(), bytes = buffer.len(), "built PDF");
    Ok(buffer)
}

// ────────────────────────────────────────────────────────────────────────────
// Page content
// ────────────────────────────────────────────────────────────────────────────

fn page_content(page: &RenderedPage, format: &PageFormat) -> Result<Content, ExportError> {
    let height_pt = format.height_px * PT_PER_PX;
    let background = parse_hex_color(&page.style.background).ok_or_else(|| {
        rasterize_error(page.page_id, format!("invalid background color '{}'", page.style.background))
    })?;

    let mut ops = vec![
        Operation::new("rg", rgb_operands(background)),
        Operation::new(
            "re",
            vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(format.width_px * PT_PER_PX),
                Object::Real(height_pt),
            ],
        ),
        Operation::new("f", vec![]),
    ];

    for line in flow_page(page, format).lines {
        ops.extend(line_operations(page.page_id, &line, format, height_pt)?);
    }
    Ok(Content { operations: ops })
}

fn line_operations(
    page_id: PageId,
    line: &FlowLine,
    format: &PageFormat,
    height_pt: f32,
) -> Result<Vec<Operation>, ExportError> {
    let color = parse_hex_color(&line.color)
        .ok_or_else(|| rasterize_error(page_id, format!("invalid text color '{}'", line.color)))?;
    let x = (format.margin_px + line.x) * PT_PER_PX;
    let y = height_pt - (format.margin_px + line.baseline()) * PT_PER_PX;

    Ok(vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(font_resource(line.font, line.bold).as_bytes().to_vec()),
                Object::Real(line.size * PT_PER_PX),
            ],
        ),
        Operation::new("rg", rgb_operands(color)),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ])
}

fn rasterize_error(page_id: PageId, reason: String) -> ExportError {
    ExportError::Rasterize { page_id, reason }
}

fn rgb_operands([r, g, b]: [f32; 3]) -> Vec<Object> {
    vec![Object::Real(r), Object::Real(g), Object::Real(b)]
}

// ────────────────────────────────────────────────────────────────────────────
// Fonts & text encoding
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const FONT_RESOURCES: [(FontClass, bool, &str); 6] = [
    (FontClass::Sans,  false, "F1"),
    (FontClass::Sans,  true,  "F2"),
    (FontClass::Serif, false, "F3"),
    (FontClass::Serif, true,  "F4"),
    (FontClass::Mono,  false, "F5"),
    (FontClass::Mono,  true,  "F6"),
];

fn font_resource(class: FontClass, bold: bool) -> &'static str {
    FONT_RESOURCES
        .iter()
        .find(|(c, b, _)| *c == class && *b == bold)
        .map_or("F1", |(_, _, name)| name)
}

fn add_font_resources(doc: &mut Document) -> ObjectId {
    let mut fonts = Dictionary::new();
    for (class, bold, name) in FONT_RESOURCES {
        let (regular, heavy) = class.pdf_base_fonts();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => if bold { heavy } else { regular },
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(name, font_id);
    }
    doc.add_object(dictionary! { "Font" => fonts })
}

/// Latin-1 passes through, a few typographic marks map to their WinAnsi
/// codes, anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// The person's name from the first header, for the Info dictionary.
fn document_title(pages: &[RenderedPage]) -> String {
    pages
        .iter()
        .filter_map(|p| p.header.as_ref())
        .flat_map(|h| h.nodes.iter())
        .find_map(|n| match n {
            Node::Name(name) => Some(name.clone()),
            _ => None,
        })
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
