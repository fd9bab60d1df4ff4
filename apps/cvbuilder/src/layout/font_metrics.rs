//! Static glyph-width tables for the three font classes a CV can resolve to.
//!
//! Widths are in em units (fraction of the font size), taken from the standard
//! PDF base-14 metrics so the estimate matches what the PDF exporter draws.
//! Arbitrary CSS families are mapped onto the closest class.
//! Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Bold glyphs run slightly wider than the regular tables.
pub const BOLD_WIDTH_FACTOR: f32 = 1.06;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontClass {
    /// Helvetica metrics.
    Sans,
    /// Times metrics.
    Serif,
    /// Courier metrics.
    Mono,
}

impl FontClass {
    /// Classifies a CSS `font-family` value such as `"Georgia, serif"`.
    pub fn from_css(family: &str) -> Self {
        let lower = family.to_lowercase();
        if lower.contains("mono") || lower.contains("courier") {
            return FontClass::Mono;
        }
        let serif_names = ["georgia", "times", "garamond", "cambria", "palatino"];
        if serif_names.iter().any(|n| lower.contains(n))
            || (lower.contains("serif") && !lower.contains("sans"))
        {
            return FontClass::Serif;
        }
        FontClass::Sans
    }

    /// Base-14 PDF font names for (regular, bold).
    pub fn pdf_base_fonts(self) -> (&'static str, &'static str) {
        match self {
            FontClass::Sans => ("Helvetica", "Helvetica-Bold"),
            FontClass::Serif => ("Times-Roman", "Times-Bold"),
            FontClass::Mono => ("Courier", "Courier-Bold"),
        }
    }
}

pub struct FontMetricTable {
    pub class: FontClass,
    widths: [f32; 95],
    /// Used for codepoints outside the table.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Greedy word-wrap of a single visual line into lines no wider than
    /// `max_width_em`. A word wider than the line keeps a line to itself.
    /// Whitespace-only input yields no lines.
    pub fn wrap(&self, s: &str, max_width_em: f32, bold: bool) -> Vec<String> {
        let factor = if bold { BOLD_WIDTH_FACTOR } else { 1.0 };
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = self.measure_str(word) * factor;
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
                continue;
            }
            let space_w = self.space_width * factor;
            if current_width + space_w + word_w > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

pub fn get_metrics(class: FontClass) -> &'static FontMetricTable {
    match class {
        FontClass::Sans => &SANS_TABLE,
        FontClass::Serif => &SERIF_TABLE,
        FontClass::Mono => &MONO_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Width tables
// ────────────────────────────────────────────────────────────────────────────

static SANS_TABLE: FontMetricTable = FontMetricTable {
    class: FontClass::Sans,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.55,
    space_width: 0.278,
};

static SERIF_TABLE: FontMetricTable = FontMetricTable {
    class: FontClass::Serif,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0-9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.50,
    space_width: 0.250,
};

static MONO_TABLE: FontMetricTable = FontMetricTable {
    class: FontClass::Mono,
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_families_classify() {
        assert_eq!(FontClass::from_css("Georgia, serif"), FontClass::Serif);
        assert_eq!(FontClass::from_css("Times New Roman, serif"), FontClass::Serif);
        assert_eq!(FontClass::from_css("Arial, sans-serif"), FontClass::Sans);
        assert_eq!(FontClass::from_css("Courier New, monospace"), FontClass::Mono);
        assert_eq!(FontClass::from_css("Brush Script MT, cursive"), FontClass::Sans);
    }

    #[test]
    fn test_measure_str_sums_widths() {
        let sans = get_metrics(FontClass::Sans);
        assert!((sans.measure_str("ii") - 0.444).abs() < 1e-4);
        assert!((get_metrics(FontClass::Mono).measure_str("abc") - 1.8).abs() < 1e-4);
    }

    #[test]
    fn test_non_ascii_uses_average() {
        let serif = get_metrics(FontClass::Serif);
        assert!((serif.measure_str("é") - serif.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_breaks_on_width() {
        let mono = get_metrics(FontClass::Mono);
        // Each 4-letter word is 2.4em, space 0.6em: two words = 5.4em.
        let lines = mono.wrap("abcd efgh ijkl", 5.5, false);
        assert_eq!(lines, vec!["abcd efgh", "ijkl"]);
    }

    #[test]
    fn test_wrap_keeps_overlong_word() {
        let mono = get_metrics(FontClass::Mono);
        let lines = mono.wrap("supercalifragilistic ok", 3.0, false);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn test_wrap_blank_yields_nothing() {
        assert!(get_metrics(FontClass::Sans).wrap("   ", 10.0, false).is_empty());
    }
}
