//! Named color and font choices offered next to the free-form pickers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub value: &'static str,
}

#[rustfmt::skip]
pub const COLOR_PRESETS: &[Preset] = &[
    Preset { name: "Blue", value: "#3b82f6" },
    Preset { name: "Green", value: "#10b981" },
    Preset { name: "Purple", value: "#8b5cf6" },
    Preset { name: "Red", value: "#ef4444" },
    Preset { name: "Orange", value: "#f59e0b" },
    Preset { name: "Teal", value: "#14b8a6" },
    Preset { name: "Indigo", value: "#6366f1" },
    Preset { name: "Pink", value: "#ec4899" },
    Preset { name: "Gray", value: "#6b7280" },
    Preset { name: "Black", value: "#000000" },
];

#[rustfmt::skip]
pub const FONT_PRESETS: &[Preset] = &[
    Preset { name: "Arial", value: "Arial, sans-serif" },
    Preset { name: "Georgia", value: "Georgia, serif" },
    Preset { name: "Times New Roman", value: "Times New Roman, serif" },
    Preset { name: "Helvetica", value: "Helvetica, sans-serif" },
    Preset { name: "Verdana", value: "Verdana, sans-serif" },
    Preset { name: "Trebuchet MS", value: "Trebuchet MS, sans-serif" },
    Preset { name: "Courier New", value: "Courier New, monospace" },
    Preset { name: "Brush Script MT", value: "Brush Script MT, cursive" },
];

pub fn color_by_name(name: &str) -> Option<&'static str> {
    COLOR_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| p.value)
}

pub fn font_by_name(name: &str) -> Option<&'static str> {
    FONT_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| p.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(color_by_name("teal"), Some("#14b8a6"));
        assert_eq!(font_by_name("GEORGIA"), Some("Georgia, serif"));
        assert_eq!(color_by_name("chartreuse"), None);
    }
}
