//! Document Model: the CV being edited plus its page/section assignment.
//!
//! All mutation of a `Document` goes through the section manager, the page manager,
//! and the layout engine; form collaborators write the plain data fields directly.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::customization::Customization;
use crate::templates::Template;

pub const HEADER: &str = "header";
pub const CUSTOM_PREFIX: &str = "custom-";

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

/// A section identifier as stored on a page: a predefined name (`"experience"`)
/// or a generated custom id (`"custom-3"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn header() -> Self {
        Self(HEADER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_header(&self) -> bool {
        self.0 == HEADER
    }

    pub fn is_custom(&self) -> bool {
        self.0.starts_with(CUSTOM_PREFIX)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page identity. Assigned as `max(existing) + 1` and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub sections: Vec<SectionId>,
}

impl Page {
    pub fn new(id: PageId, sections: Vec<SectionId>) -> Self {
        Self { id, sections }
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.sections.contains(id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section data
// ────────────────────────────────────────────────────────────────────────────

/// Free-text personal fields. An empty string means "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub dates: String,
    pub description: String,
    pub technologies: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Achievement {
    pub title: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Publication {
    pub title: String,
    pub publisher: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volunteer {
    pub role: String,
    pub organization: String,
    pub dates: String,
    pub description: String,
}

/// A single named chip: interests and `tags` custom sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The repeatable collections a document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Experience,
    Education,
    Skills,
    Projects,
    Languages,
    Certifications,
    Achievements,
    Publications,
    Volunteer,
    Interests,
}

impl RecordKind {
    pub const ALL: [RecordKind; 10] = [
        RecordKind::Experience,
        RecordKind::Education,
        RecordKind::Skills,
        RecordKind::Projects,
        RecordKind::Languages,
        RecordKind::Certifications,
        RecordKind::Achievements,
        RecordKind::Publications,
        RecordKind::Volunteer,
        RecordKind::Interests,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Experience => "experience",
            RecordKind::Education => "education",
            RecordKind::Skills => "skills",
            RecordKind::Projects => "projects",
            RecordKind::Languages => "languages",
            RecordKind::Certifications => "certifications",
            RecordKind::Achievements => "achievements",
            RecordKind::Publications => "publications",
            RecordKind::Volunteer => "volunteer",
            RecordKind::Interests => "interests",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Custom sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Simple,
    Textarea,
    List,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSection {
    pub id: SectionId,
    pub name: String,
    pub icon: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomListItem {
    pub title: String,
    pub subtitle: String,
    pub dates: String,
    pub description: String,
}

/// Stored content of a custom section, shaped by its `ContentType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CustomContent {
    Simple(String),
    Textarea(String),
    List(Vec<CustomListItem>),
    Tags(Vec<Tag>),
}

impl CustomContent {
    pub fn empty(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Simple => CustomContent::Simple(String::new()),
            ContentType::Textarea => CustomContent::Textarea(String::new()),
            ContentType::List => CustomContent::List(Vec::new()),
            ContentType::Tags => CustomContent::Tags(Vec::new()),
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            CustomContent::Simple(_) => ContentType::Simple,
            CustomContent::Textarea(_) => ContentType::Textarea,
            CustomContent::List(_) => ContentType::List,
            CustomContent::Tags(_) => ContentType::Tags,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub template_id: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub volunteer: Vec<Volunteer>,
    #[serde(default)]
    pub interests: Vec<Tag>,
    #[serde(default)]
    pub custom_sections: Vec<CustomSection>,
    #[serde(default)]
    pub custom_sections_data: BTreeMap<SectionId, CustomContent>,
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Style overrides, snapshotted from the template at creation.
    #[serde(default)]
    pub customization: Customization,
    /// Source for custom section ids; only ever increases.
    #[serde(default)]
    custom_seq: u64,
}

impl Document {
    /// Creates an empty document whose first page carries the template's sections.
    pub fn new(template: &Template) -> Self {
        let sections = template.sections.iter().map(|s| SectionId::new(*s)).collect();
        Self {
            id: Uuid::new_v4(),
            template_id: template.id.to_string(),
            created_at: Utc::now(),
            personal_info: PersonalInfo::default(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
            achievements: Vec::new(),
            publications: Vec::new(),
            volunteer: Vec::new(),
            interests: Vec::new(),
            custom_sections: Vec::new(),
            custom_sections_data: BTreeMap::new(),
            pages: vec![Page::new(PageId(1), sections)],
            customization: Customization::from_template(template),
            custom_seq: 0,
        }
    }

    /// Parses a document and restores the at-least-one-page invariant.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Document = serde_json::from_str(json)?;
        if doc.pages.is_empty() {
            doc.pages.push(Page::new(PageId(1), vec![SectionId::header()]));
        }
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// `max(existing ids) + 1`; ids start at 1.
    pub fn next_page_id(&self) -> PageId {
        PageId(self.pages.iter().map(|p| p.id.0).max().unwrap_or(0) + 1)
    }

    pub fn first_page_id(&self) -> Option<PageId> {
        self.pages.first().map(|p| p.id)
    }

    /// The first page in document order that lists `header`.
    pub fn primary_header_page(&self) -> Option<PageId> {
        self.pages
            .iter()
            .find(|p| p.sections.iter().any(SectionId::is_header))
            .map(|p| p.id)
    }

    pub fn custom_section(&self, id: &SectionId) -> Option<&CustomSection> {
        self.custom_sections.iter().find(|s| &s.id == id)
    }

    /// Every section identifier across all pages, in page order.
    pub fn all_section_ids(&self) -> Vec<SectionId> {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter().cloned())
            .collect()
    }

    /// Generates a custom section id never handed out before in this document.
    ///
    /// Ids already present (e.g. from a loaded file) are skipped, so the result
    /// never collides with a catalog entry, a page reference, or stored data.
    pub fn next_custom_id(&mut self) -> SectionId {
        loop {
            self.custom_seq += 1;
            let candidate = SectionId::new(format!("{CUSTOM_PREFIX}{}", self.custom_seq));
            let taken = self.custom_sections.iter().any(|s| s.id == candidate)
                || self.custom_sections_data.contains_key(&candidate)
                || self.pages.iter().any(|p| p.contains(&candidate));
            if !taken {
                return candidate;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
