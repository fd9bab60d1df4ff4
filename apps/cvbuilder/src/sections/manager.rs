//! Section Manager: which sections sit on which page, and section data editing.
//!
//! Invalid requests (duplicate add, removing `header`, out-of-range reorder) are
//! ordinary no-ops: the functions return `false`/`None` and leave the document as-is.

use tracing::debug;

use crate::models::document::{
    Achievement, Certification, ContentType, CustomContent, CustomSection, Document, Education,
    Experience, Language, PageId, Project, Publication, RecordKind, SectionId, Skill, Tag,
    Volunteer,
};
use crate::sections::catalog::{self, CatalogEntry, CATALOG};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// What the user picked in the "add section" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionDescriptor {
    /// A predefined catalog entry.
    Predefined(&'static CatalogEntry),
    /// An identifier that already exists elsewhere (custom section, template-only id).
    Existing(SectionId),
    /// A brand-new custom section; an id is generated on registration.
    NewCustom {
        name: String,
        icon: String,
        content_type: ContentType,
    },
}

/// Full working copy of one section's data. Committing replaces the stored
/// collection wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionDraft {
    Summary(String),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
    Projects(Vec<Project>),
    Languages(Vec<Language>),
    Certifications(Vec<Certification>),
    Achievements(Vec<Achievement>),
    Publications(Vec<Publication>),
    Volunteer(Vec<Volunteer>),
    Interests(Vec<Tag>),
    Custom { id: SectionId, content: CustomContent },
    /// Boilerplate sections with nothing to edit (`references`).
    Static(SectionId),
}

// ────────────────────────────────────────────────────────────────────────────
// Page section list
// ────────────────────────────────────────────────────────────────────────────

/// Appends a section to `page`. Returns the identifier that was added, or `None`
/// when the page is unknown or already carries that section.
pub fn add_section(
    document: &mut Document,
    page: PageId,
    descriptor: SectionDescriptor,
) -> Option<SectionId> {
    document.page(page)?;

    let id = match descriptor {
        SectionDescriptor::Predefined(entry) => SectionId::new(entry.id),
        SectionDescriptor::Existing(id) => id,
        SectionDescriptor::NewCustom {
            name,
            icon,
            content_type,
        } => {
            let id = document.next_custom_id();
            document.custom_sections.push(CustomSection {
                id: id.clone(),
                name,
                icon,
                content_type,
            });
            document
                .custom_sections_data
                .insert(id.clone(), CustomContent::empty(content_type));
            debug!(section = %id, "registered custom section");
            id
        }
    };

    let target = document.page_mut(page)?;
    if target.contains(&id) {
        return None;
    }
    target.sections.push(id.clone());
    Some(id)
}

/// Removes `section` from `page`. Custom sections are deleted everywhere,
/// together with their catalog entry and data.
pub fn remove_section(document: &mut Document, page: PageId, section: &SectionId) -> bool {
    if section.is_header() {
        return false;
    }
    let Some(target) = document.page_mut(page) else {
        return false;
    };
    let before = target.sections.len();
    target.sections.retain(|s| s != section);
    if target.sections.len() == before {
        return false;
    }

    if section.is_custom() || document.custom_section(section).is_some() {
        for p in &mut document.pages {
            p.sections.retain(|s| s != section);
        }
        document.custom_sections.retain(|c| &c.id != section);
        document.custom_sections_data.remove(section);
        debug!(section = %section, "deleted custom section and its data");
    }
    true
}

/// Moves the entry at `from` to position `to` within the page.
pub fn reorder_section(document: &mut Document, page: PageId, from: usize, to: usize) -> bool {
    let Some(target) = document.page_mut(page) else {
        return false;
    };
    let len = target.sections.len();
    if from >= len || to >= len {
        return false;
    }
    let moved = target.sections.remove(from);
    target.sections.insert(to, moved);
    true
}

/// Catalog entries not yet placed on `page`.
pub fn list_available_sections(document: &Document, page: PageId) -> Vec<&'static CatalogEntry> {
    let Some(target) = document.page(page) else {
        return Vec::new();
    };
    CATALOG
        .iter()
        .filter(|entry| !target.sections.iter().any(|s| s == entry.id))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Section data
// ────────────────────────────────────────────────────────────────────────────

/// Opens a working copy of a section's stored data.
///
/// Returns `None` for identifiers with no editable data (`header` is edited through
/// the personal-info form; unknown ids have nothing stored).
pub fn edit_section(document: &Document, section: &SectionId) -> Option<SectionDraft> {
    if let Some(custom) = document.custom_section(section) {
        let content = document
            .custom_sections_data
            .get(section)
            .cloned()
            .unwrap_or_else(|| CustomContent::empty(custom.content_type));
        return Some(SectionDraft::Custom {
            id: section.clone(),
            content,
        });
    }

    match section.as_str() {
        "summary" => return Some(SectionDraft::Summary(document.personal_info.summary.clone())),
        "references" => return Some(SectionDraft::Static(section.clone())),
        _ => {}
    }

    let draft = match RecordKind::from_id(section.as_str())? {
        RecordKind::Experience => SectionDraft::Experience(document.experience.clone()),
        RecordKind::Education => SectionDraft::Education(document.education.clone()),
        RecordKind::Skills => SectionDraft::Skills(document.skills.clone()),
        RecordKind::Projects => SectionDraft::Projects(document.projects.clone()),
        RecordKind::Languages => SectionDraft::Languages(document.languages.clone()),
        RecordKind::Certifications => {
            SectionDraft::Certifications(document.certifications.clone())
        }
        RecordKind::Achievements => SectionDraft::Achievements(document.achievements.clone()),
        RecordKind::Publications => SectionDraft::Publications(document.publications.clone()),
        RecordKind::Volunteer => SectionDraft::Volunteer(document.volunteer.clone()),
        RecordKind::Interests => SectionDraft::Interests(document.interests.clone()),
    };
    Some(draft)
}

/// Writes a draft back, replacing the stored collection. Custom drafts are
/// rejected when the section no longer exists or the content shape changed.
pub fn commit_section(document: &mut Document, draft: SectionDraft) -> bool {
    match draft {
        SectionDraft::Summary(text) => document.personal_info.summary = text,
        SectionDraft::Experience(items) => document.experience = items,
        SectionDraft::Education(items) => document.education = items,
        SectionDraft::Skills(items) => document.skills = items,
        SectionDraft::Projects(items) => document.projects = items,
        SectionDraft::Languages(items) => document.languages = items,
        SectionDraft::Certifications(items) => document.certifications = items,
        SectionDraft::Achievements(items) => document.achievements = items,
        SectionDraft::Publications(items) => document.publications = items,
        SectionDraft::Volunteer(items) => document.volunteer = items,
        SectionDraft::Interests(items) => document.interests = items,
        SectionDraft::Custom { id, content } => {
            let Some(custom) = document.custom_section(&id) else {
                return false;
            };
            if custom.content_type != content.content_type() {
                return false;
            }
            document.custom_sections_data.insert(id, content);
        }
        SectionDraft::Static(_) => {}
    }
    true
}

/// Number of entries a section holds, for the badge next to its name.
pub fn section_data_count(document: &Document, section: &SectionId) -> usize {
    if let Some(content) = document.custom_sections_data.get(section) {
        return match content {
            CustomContent::List(items) => items.len(),
            CustomContent::Tags(tags) => tags.len(),
            CustomContent::Simple(text) | CustomContent::Textarea(text) => {
                usize::from(!text.trim().is_empty())
            }
        };
    }
    if section.as_str() == "summary" {
        return usize::from(!document.personal_info.summary.trim().is_empty());
    }
    match RecordKind::from_id(section.as_str()) {
        Some(RecordKind::Experience) => document.experience.len(),
        Some(RecordKind::Education) => document.education.len(),
        Some(RecordKind::Skills) => document.skills.len(),
        Some(RecordKind::Projects) => document.projects.len(),
        Some(RecordKind::Languages) => document.languages.len(),
        Some(RecordKind::Certifications) => document.certifications.len(),
        Some(RecordKind::Achievements) => document.achievements.len(),
        Some(RecordKind::Publications) => document.publications.len(),
        Some(RecordKind::Volunteer) => document.volunteer.len(),
        Some(RecordKind::Interests) => document.interests.len(),
        None => 0,
    }
}

/// Convenience for the "add section" dialog.
pub fn predefined(id: &str) -> Option<SectionDescriptor> {
    catalog::lookup(id).map(SectionDescriptor::Predefined)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
