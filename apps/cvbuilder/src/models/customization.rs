//! Customization Model: sparse style overrides layered over a template's defaults.

use serde::{Deserialize, Serialize};

use crate::templates::presets;
use crate::templates::{Knob, Template};

pub const DEFAULT_FONT_SIZE: u8 = 16;
pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 18;

fn default_font_size() -> u8 {
    DEFAULT_FONT_SIZE
}

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOverrides {
    pub heading: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default)]
    pub colors: ColorOverrides,
    #[serde(default)]
    pub fonts: FontOverrides,
    #[serde(default = "default_font_size")]
    pub font_size: u8,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            colors: ColorOverrides::default(),
            fonts: FontOverrides::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Primary,
    Secondary,
    Background,
    Text,
}

impl ColorSlot {
    /// The knob a template must expose for this slot to be user-editable.
    /// Text color has no knob and follows the snapshot only.
    pub fn knob(self) -> Option<Knob> {
        match self {
            ColorSlot::Primary => Some(Knob::PrimaryColor),
            ColorSlot::Secondary => Some(Knob::SecondaryColor),
            ColorSlot::Background => Some(Knob::BackgroundColor),
            ColorSlot::Text => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSlot {
    Heading,
    Body,
}

impl FontSlot {
    pub fn knob(self) -> Knob {
        match self {
            FontSlot::Heading => Knob::HeadingFont,
            FontSlot::Body => Knob::BodyFont,
        }
    }
}

/// Concrete style after overrides are applied. Every field has a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub heading_font: String,
    pub body_font: String,
    pub font_size: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

impl Customization {
    /// One-time snapshot of the template's defaults; not a live link.
    pub fn from_template(template: &Template) -> Self {
        let c = &template.default_colors;
        let f = &template.default_fonts;
        Self {
            colors: ColorOverrides {
                primary: Some(c.primary.to_string()),
                secondary: Some(c.secondary.to_string()),
                background: Some(c.background.to_string()),
                text: Some(c.text.to_string()),
            },
            fonts: FontOverrides {
                heading: Some(f.heading.to_string()),
                body: Some(f.body.to_string()),
            },
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Sets a color if the template exposes the matching knob. `value` is a hex
    /// color or a preset name such as `"Teal"`. Returns whether it applied.
    pub fn set_color(&mut self, template: &Template, slot: ColorSlot, value: &str) -> bool {
        match slot.knob() {
            Some(knob) if template.allows(knob) => {}
            _ => return false,
        }
        let value = presets::color_by_name(value).unwrap_or(value).trim();
        if parse_hex_color(value).is_none() {
            return false;
        }
        let field = match slot {
            ColorSlot::Primary => &mut self.colors.primary,
            ColorSlot::Secondary => &mut self.colors.secondary,
            ColorSlot::Background => &mut self.colors.background,
            ColorSlot::Text => &mut self.colors.text,
        };
        *field = Some(value.to_string());
        true
    }

    /// Accepts a preset name (`"Georgia"`) or any CSS font-family list.
    pub fn set_font(&mut self, template: &Template, slot: FontSlot, value: &str) -> bool {
        if !template.allows(slot.knob()) {
            return false;
        }
        let value = presets::font_by_name(value).unwrap_or(value).trim();
        if value.is_empty() {
            return false;
        }
        let field = match slot {
            FontSlot::Heading => &mut self.fonts.heading,
            FontSlot::Body => &mut self.fonts.body,
        };
        *field = Some(value.to_string());
        true
    }

    /// Stores the size clamped into the supported range and returns it.
    pub fn set_font_size(&mut self, size: u8) -> u8 {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.font_size
    }

    pub fn reset(&mut self, template: &Template) {
        *self = Self::from_template(template);
    }

    /// Override if present (and non-empty), else the template default.
    pub fn resolve(&self, template: &Template) -> ResolvedStyle {
        let c = &template.default_colors;
        let f = &template.default_fonts;
        ResolvedStyle {
            primary: pick(&self.colors.primary, c.primary),
            secondary: pick(&self.colors.secondary, c.secondary),
            background: pick(&self.colors.background, c.background),
            text: pick(&self.colors.text, c.text),
            heading_font: pick(&self.fonts.heading, f.heading),
            body_font: pick(&self.fonts.body, f.body),
            font_size: if self.font_size == 0 {
                DEFAULT_FONT_SIZE
            } else {
                self.font_size
            },
        }
    }
}

/// `#rrggbb` or `#rgb` to unit RGB.
pub fn parse_hex_color(value: &str) -> Option<[f32; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f32::from(v) / 255.0);
    match hex.len() {
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let expand = |i: usize| channel(&hex[i..=i].repeat(2));
            Some([expand(0)?, expand(1)?, expand(2)?])
        }
        _ => None,
    }
}

fn pick(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
