//! Inline text model: free text keeps its line breaks as explicit break markers.

/// One inline run inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Break,
}

/// Splits on `\n` and joins the pieces with `Inline::Break`.
/// Empty pieces are omitted; consecutive breaks still represent blank lines.
pub fn paragraph(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(Inline::Break);
        }
        if !line.is_empty() {
            out.push(Inline::Text(line.to_string()));
        }
    }
    out
}

/// Inverse of [`paragraph`]: breaks become `\n`.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push_str(t),
            Inline::Break => out.push('\n'),
        }
    }
    out
}

/// Visual lines of a paragraph, one entry per break-separated run.
pub fn visual_lines(inlines: &[Inline]) -> Vec<String> {
    plain_text(inlines).split('\n').map(str::to_string).collect()
}

/// Whitespace-only values count as absent.
pub fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_lines_become_text_break_text() {
        assert_eq!(
            paragraph("Line1\nLine2"),
            vec![
                Inline::Text("Line1".into()),
                Inline::Break,
                Inline::Text("Line2".into())
            ]
        );
        assert_eq!(visual_lines(&paragraph("Line1\nLine2")), vec!["Line1", "Line2"]);
    }

    #[test]
    fn test_round_trip_preserves_edge_cases() {
        for s in ["", "\n", "a\n\nb", "trailing\n", "\nleading", "no breaks"] {
            assert_eq!(plain_text(&paragraph(s)), s, "input {s:?}");
        }
    }

    #[test]
    fn test_placeholder_for_blank() {
        assert_eq!(or_placeholder("  ", "Dates"), "Dates");
        assert_eq!(or_placeholder("2021", "Dates"), "2021");
    }
}
