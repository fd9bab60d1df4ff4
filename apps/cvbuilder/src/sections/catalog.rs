//! Predefined section catalog. `header` is not listed: every page may carry it
//! and it is never offered as an addable section.

use crate::models::document::{ContentType, Document, SectionId, HEADER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub content_type: ContentType,
}

#[rustfmt::skip]
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { id: "summary", name: "Professional Summary", icon: "📝", content_type: ContentType::Textarea },
    CatalogEntry { id: "experience", name: "Work Experience", icon: "💼", content_type: ContentType::List },
    CatalogEntry { id: "education", name: "Education", icon: "🎓", content_type: ContentType::List },
    CatalogEntry { id: "skills", name: "Skills", icon: "⚡", content_type: ContentType::List },
    CatalogEntry { id: "projects", name: "Projects", icon: "🚀", content_type: ContentType::List },
    CatalogEntry { id: "languages", name: "Languages", icon: "🌎", content_type: ContentType::List },
    CatalogEntry { id: "certifications", name: "Certifications", icon: "🏆", content_type: ContentType::List },
    CatalogEntry { id: "achievements", name: "Achievements", icon: "⭐", content_type: ContentType::List },
    CatalogEntry { id: "publications", name: "Publications", icon: "📚", content_type: ContentType::List },
    CatalogEntry { id: "references", name: "References", icon: "👥", content_type: ContentType::Simple },
    CatalogEntry { id: "volunteer", name: "Volunteer Experience", icon: "❤️", content_type: ContentType::List },
    CatalogEntry { id: "interests", name: "Interests", icon: "🎯", content_type: ContentType::Tags },
];

pub const FALLBACK_ICON: &str = "📄";

pub fn lookup(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Display name for any identifier: catalog name, custom section name, or the raw id.
pub fn display_name(document: &Document, id: &SectionId) -> String {
    if id.as_str() == HEADER {
        return "Header".to_string();
    }
    if let Some(entry) = lookup(id.as_str()) {
        return entry.name.to_string();
    }
    match document.custom_section(id) {
        Some(custom) => custom.name.clone(),
        None => id.to_string(),
    }
}

pub fn icon(document: &Document, id: &SectionId) -> String {
    if let Some(entry) = lookup(id.as_str()) {
        return entry.icon.to_string();
    }
    match document.custom_section(id) {
        Some(custom) if !custom.icon.is_empty() => custom.icon.clone(),
        _ => FALLBACK_ICON.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    #[test]
    fn test_catalog_excludes_header() {
        assert!(lookup(HEADER).is_none());
        assert_eq!(CATALOG.len(), 12);
    }

    #[test]
    fn test_names_fall_back_to_identifier() {
        let doc = Document::new(templates::find("creative").unwrap());
        assert_eq!(display_name(&doc, &SectionId::new("experience")), "Work Experience");
        assert_eq!(display_name(&doc, &SectionId::new("portfolio")), "portfolio");
        assert_eq!(icon(&doc, &SectionId::new("portfolio")), FALLBACK_ICON);
    }
}
