//! Template Registry: the static catalog of visual presets a CV can be built on.
//!
//! Templates are immutable `'static` data. A document records only the template id;
//! the customization snapshot taken at creation owns its own copies of colors and
//! fonts, so nothing in here can retroactively change an in-progress document.

pub mod presets;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Column arrangement used when a page is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    SingleColumn,
    TwoColumn,
}

/// Style knob a template allows the user to override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Knob {
    PrimaryColor,
    SecondaryColor,
    BackgroundColor,
    HeadingFont,
    BodyFont,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFonts {
    pub heading: &'static str,
    pub body: &'static str,
}

/// A template definition from the static registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub is_popular: bool,
    /// Section identifiers placed on the first page of a fresh document.
    pub sections: &'static [&'static str],
    pub layout: LayoutMode,
    pub default_colors: TemplateColors,
    pub default_fonts: TemplateFonts,
    pub knobs: &'static [Knob],
}

impl Template {
    pub fn allows(&self, knob: Knob) -> bool {
        self.knobs.contains(&knob)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

const ALL_KNOBS: &[Knob] = &[
    Knob::PrimaryColor,
    Knob::SecondaryColor,
    Knob::BackgroundColor,
    Knob::HeadingFont,
    Knob::BodyFont,
];

static TEMPLATES: [Template; 4] = [
    Template {
        id: "modern",
        name: "Modern",
        description: "Clean, professional layout with emphasis on skills",
        category: "Professional",
        is_popular: true,
        sections: &["header", "summary", "experience", "education", "skills"],
        layout: LayoutMode::SingleColumn,
        default_colors: TemplateColors {
            primary: "#2563eb",
            secondary: "#1e40af",
            background: "#ffffff",
            text: "#1f2937",
        },
        default_fonts: TemplateFonts {
            heading: "Helvetica, sans-serif",
            body: "Arial, sans-serif",
        },
        knobs: ALL_KNOBS,
    },
    Template {
        id: "creative",
        name: "Creative",
        description: "Modern design perfect for creative industries",
        category: "Creative",
        is_popular: false,
        sections: &["header", "portfolio", "skills", "experience", "education"],
        layout: LayoutMode::TwoColumn,
        default_colors: TemplateColors {
            primary: "#7c3aed",
            secondary: "#5b21b6",
            background: "#faf5ff",
            text: "#1f2937",
        },
        default_fonts: TemplateFonts {
            heading: "Trebuchet MS, sans-serif",
            body: "Verdana, sans-serif",
        },
        knobs: ALL_KNOBS,
    },
    Template {
        id: "classic",
        name: "Classic",
        description: "Traditional format preferred by conservative industries",
        category: "Traditional",
        is_popular: false,
        sections: &["header", "experience", "education", "skills", "references"],
        layout: LayoutMode::SingleColumn,
        default_colors: TemplateColors {
            primary: "#374151",
            secondary: "#111827",
            background: "#ffffff",
            text: "#111827",
        },
        default_fonts: TemplateFonts {
            heading: "Georgia, serif",
            body: "Times New Roman, serif",
        },
        knobs: &[Knob::PrimaryColor, Knob::HeadingFont, Knob::BodyFont],
    },
    Template {
        id: "minimal",
        name: "Minimal",
        description: "Simple and focused on content",
        category: "Minimalist",
        is_popular: false,
        sections: &["header", "experience", "education"],
        layout: LayoutMode::SingleColumn,
        default_colors: TemplateColors {
            primary: "#000000",
            secondary: "#666666",
            background: "#ffffff",
            text: "#111111",
        },
        default_fonts: TemplateFonts {
            heading: "Helvetica, sans-serif",
            body: "Helvetica, sans-serif",
        },
        knobs: &[Knob::PrimaryColor, Knob::BodyFont],
    },
];

/// All registered templates, in gallery order.
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
