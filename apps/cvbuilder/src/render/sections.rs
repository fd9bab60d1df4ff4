//! Per-section renderers and the tag → renderer registry.
//!
//! Predefined sections dispatch on their identifier; custom sections dispatch on
//! their `ContentType`. Anything else falls through to a titled placeholder.

use std::collections::HashMap;

use crate::models::document::{ContentType, CustomContent, CustomSection, RecordKind, SectionId};
use crate::render::text::{or_placeholder, paragraph};
use crate::render::{Node, RenderContext, SectionView};
use crate::sections::catalog;

pub type SectionRenderFn = fn(&RenderContext<'_>, &SectionId) -> SectionView;
pub type CustomRenderFn = fn(&CustomSection, Option<&CustomContent>) -> Vec<Node>;

pub const SUMMARY_PLACEHOLDER: &str = "Experienced professional with a proven track record...";
pub const REFERENCES_TEXT: &str = "References available upon request.";

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

pub struct RendererRegistry {
    sections: HashMap<&'static str, SectionRenderFn>,
    custom: HashMap<ContentType, CustomRenderFn>,
}

impl RendererRegistry {
    /// Registry with every predefined section type and all custom content types.
    pub fn standard() -> Self {
        let mut registry = Self {
            sections: HashMap::new(),
            custom: HashMap::new(),
        };
        registry.register("header", render_header);
        registry.register("summary", render_summary);
        registry.register("references", render_references);
        registry.register(RecordKind::Experience.as_str(), render_experience);
        registry.register(RecordKind::Education.as_str(), render_education);
        registry.register(RecordKind::Skills.as_str(), render_skills);
        registry.register(RecordKind::Projects.as_str(), render_projects);
        registry.register(RecordKind::Languages.as_str(), render_languages);
        registry.register(RecordKind::Certifications.as_str(), render_certifications);
        registry.register(RecordKind::Achievements.as_str(), render_achievements);
        registry.register(RecordKind::Publications.as_str(), render_publications);
        registry.register(RecordKind::Volunteer.as_str(), render_volunteer);
        registry.register(RecordKind::Interests.as_str(), render_interests);

        registry.register_custom(ContentType::Simple, render_custom_text);
        registry.register_custom(ContentType::Textarea, render_custom_text);
        registry.register_custom(ContentType::List, render_custom_list);
        registry.register_custom(ContentType::Tags, render_custom_tags);
        registry
    }

    pub fn register(&mut self, tag: &'static str, renderer: SectionRenderFn) {
        self.sections.insert(tag, renderer);
    }

    pub fn register_custom(&mut self, content_type: ContentType, renderer: CustomRenderFn) {
        self.custom.insert(content_type, renderer);
    }

    pub fn render_section(&self, ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
        if let Some(render) = self.sections.get(id.as_str()) {
            return render(ctx, id);
        }
        if let Some(custom) = ctx.document.custom_section(id) {
            let data = ctx.document.custom_sections_data.get(id);
            let nodes = match self.custom.get(&custom.content_type) {
                Some(render) => render(custom, data),
                None => Vec::new(),
            };
            return SectionView::titled(id.clone(), custom.name.clone(), nodes);
        }
        render_unknown(ctx, id)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Predefined sections
// ────────────────────────────────────────────────────────────────────────────

fn render_header(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let info = &ctx.document.personal_info;
    let mut nodes = vec![Node::Name(or_placeholder(&info.name, "Your Name"))];

    if ctx.primary_header {
        nodes.push(Node::Subtitle(or_placeholder(&info.title, "Professional Title")));
        let mut contact = vec![
            or_placeholder(&info.email, "email@example.com"),
            or_placeholder(&info.phone, "(123) 456-7890"),
            or_placeholder(&info.location, "City, Country"),
        ];
        if !info.portfolio.trim().is_empty() {
            contact.push(info.portfolio.clone());
        }
        nodes.push(Node::Contact(contact));
    }
    if !info.summary.trim().is_empty() {
        nodes.push(Node::Paragraph(paragraph(&info.summary)));
    }

    SectionView {
        id: id.clone(),
        title: None,
        nodes,
        icon: None,
        chrome: Vec::new(),
    }
}

fn render_summary(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let summary = or_placeholder(&ctx.document.personal_info.summary, SUMMARY_PLACEHOLDER);
    SectionView::titled(
        id.clone(),
        "Professional Summary",
        vec![Node::Paragraph(paragraph(&summary))],
    )
}

fn render_references(_ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    SectionView::titled(
        id.clone(),
        "References",
        vec![Node::Paragraph(paragraph(REFERENCES_TEXT))],
    )
}

fn render_experience(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.experience;
    if items.is_empty() {
        nodes.push(Node::ItemTitle("Job Title".into()));
        nodes.push(Node::Meta("Company Name | Dates".into()));
        nodes.push(Node::Paragraph(paragraph("Job responsibilities and achievements...")));
    }
    for exp in items {
        nodes.push(Node::ItemTitle(or_placeholder(&exp.job_title, "Job Title")));
        nodes.push(Node::Meta(format!(
            "{} | {}",
            or_placeholder(&exp.company, "Company Name"),
            or_placeholder(&exp.dates, "Dates")
        )));
        nodes.push(Node::Paragraph(paragraph(&or_placeholder(
            &exp.description,
            "Job responsibilities and achievements...",
        ))));
    }
    SectionView::titled(id.clone(), "Work Experience", nodes)
}

fn render_education(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.education;
    if items.is_empty() {
        nodes.push(Node::ItemTitle("Degree Name".into()));
        nodes.push(Node::Meta("Institution Name | Dates".into()));
    }
    for edu in items {
        nodes.push(Node::ItemTitle(or_placeholder(&edu.degree, "Degree Name")));
        nodes.push(Node::Meta(format!(
            "{} | {}",
            or_placeholder(&edu.institution, "Institution Name"),
            or_placeholder(&edu.dates, "Dates")
        )));
        if !edu.description.trim().is_empty() {
            nodes.push(Node::Paragraph(paragraph(&edu.description)));
        }
    }
    SectionView::titled(id.clone(), "Education", nodes)
}

fn render_skills(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let skills = &ctx.document.skills;
    let mut nodes = Vec::new();
    if skills.is_empty() {
        nodes.push(Node::Tags(vec![
            "Skill 1".into(),
            "Skill 2".into(),
            "Skill 3".into(),
        ]));
    } else {
        nodes.push(Node::Tags(
            skills
                .iter()
                .map(|s| or_placeholder(&s.name, "Skill Name"))
                .collect(),
        ));
        for skill in skills.iter().filter(|s| !s.bullet_points.is_empty()) {
            let bullets: Vec<String> = skill
                .bullet_points
                .iter()
                .map(|b| format!("• {b}"))
                .collect();
            nodes.push(Node::Meta(or_placeholder(&skill.name, "Skill Name")));
            nodes.push(Node::Paragraph(paragraph(&bullets.join("\n"))));
        }
    }
    SectionView::titled(id.clone(), "Skills", nodes)
}

fn render_projects(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.projects;
    if items.is_empty() {
        nodes.push(Node::ItemTitle("Project Name".into()));
        nodes.push(Node::Paragraph(paragraph("Project description...")));
    }
    for proj in items {
        nodes.push(Node::ItemTitle(or_placeholder(&proj.name, "Project Name")));
        if !proj.dates.trim().is_empty() {
            nodes.push(Node::Meta(proj.dates.clone()));
        }
        nodes.push(Node::Paragraph(paragraph(&or_placeholder(
            &proj.description,
            "Project description...",
        ))));
        if !proj.technologies.trim().is_empty() {
            nodes.push(Node::Meta(format!("Tech: {}", proj.technologies)));
        }
    }
    SectionView::titled(id.clone(), "Projects", nodes)
}

fn render_languages(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.languages;
    if items.is_empty() {
        nodes.push(Node::Meta("Language | Proficiency".into()));
    }
    for lang in items {
        nodes.push(Node::Meta(format!(
            "{} | {}",
            or_placeholder(&lang.name, "Language"),
            or_placeholder(&lang.proficiency, "Proficiency")
        )));
    }
    SectionView::titled(id.clone(), "Languages", nodes)
}

fn render_certifications(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.certifications;
    if items.is_empty() {
        nodes.push(Node::ItemTitle("Certification Name".into()));
        nodes.push(Node::Meta("Issuing Organization | Date".into()));
    }
    for cert in items {
        nodes.push(Node::ItemTitle(or_placeholder(&cert.name, "Certification Name")));
        nodes.push(Node::Meta(format!(
            "{} | {}",
            or_placeholder(&cert.issuer, "Issuing Organization"),
            or_placeholder(&cert.date, "Date")
        )));
    }
    SectionView::titled(id.clone(), "Certifications", nodes)
}

fn render_achievements(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.achievements;
    if items.is_empty() {
        nodes.push(Node::ItemTitle("Achievement".into()));
        nodes.push(Node::Paragraph(paragraph("Description of the achievement...")));
    }
    for item in items {
        nodes.push(Node::ItemTitle(or_placeholder(&item.title, "Achievement")));
        if !item.date.trim().is_empty() {
            nodes.push(Node::Meta(item.date.clone()));
        }
        nodes.push(Node::Paragraph(paragraph(&or_placeholder(
            &item.description,
            "Description of the achievement...",
        ))));
    }
    SectionView::titled(id.clone(), "Achievements", nodes)
}

fn render_publications(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.publications;
    if items.is_empty() {
        nodes.push(Node::ItemTitle("Publication Title".into()));
        nodes.push(Node::Meta("Publisher | Date".into()));
    }
    for item in items {
        nodes.push(Node::ItemTitle(or_placeholder(&item.title, "Publication Title")));
        nodes.push(Node::Meta(format!(
            "{} | {}",
            or_placeholder(&item.publisher, "Publisher"),
            or_placeholder(&item.date, "Date")
        )));
    }
    SectionView::titled(id.clone(), "Publications", nodes)
}

fn render_volunteer(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let mut nodes = Vec::new();
    let items = &ctx.document.volunteer;
    if items.is_empty() {
        nodes.push(Node::ItemTitle("Volunteer Role".into()));
        nodes.push(Node::Meta("Organization | Dates".into()));
    }
    for item in items {
        nodes.push(Node::ItemTitle(or_placeholder(&item.role, "Volunteer Role")));
        nodes.push(Node::Meta(format!(
            "{} | {}",
            or_placeholder(&item.organization, "Organization"),
            or_placeholder(&item.dates, "Dates")
        )));
        if !item.description.trim().is_empty() {
            nodes.push(Node::Paragraph(paragraph(&item.description)));
        }
    }
    SectionView::titled(id.clone(), "Volunteer Experience", nodes)
}

fn render_interests(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    let items = &ctx.document.interests;
    let tags = if items.is_empty() {
        vec!["Interest 1".into(), "Interest 2".into()]
    } else {
        items
            .iter()
            .map(|t| or_placeholder(&t.name, "Interest"))
            .collect()
    };
    SectionView::titled(id.clone(), "Interests", vec![Node::Tags(tags)])
}

fn render_unknown(ctx: &RenderContext<'_>, id: &SectionId) -> SectionView {
    SectionView::titled(
        id.clone(),
        catalog::display_name(ctx.document, id),
        vec![Node::Paragraph(paragraph(&format!("Content for {id}")))],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Custom sections
// ────────────────────────────────────────────────────────────────────────────

fn render_custom_text(section: &CustomSection, data: Option<&CustomContent>) -> Vec<Node> {
    let text = match data {
        Some(CustomContent::Simple(t)) | Some(CustomContent::Textarea(t)) => t.as_str(),
        _ => "",
    };
    let placeholder = format!("Add your {} here...", section.name.to_lowercase());
    vec![Node::Paragraph(paragraph(&or_placeholder(text, &placeholder)))]
}

fn render_custom_list(_section: &CustomSection, data: Option<&CustomContent>) -> Vec<Node> {
    let items: &[_] = match data {
        Some(CustomContent::List(items)) => items.as_slice(),
        _ => &[],
    };
    if items.is_empty() {
        return vec![
            Node::ItemTitle("Title".into()),
            Node::Paragraph(paragraph("Description...")),
        ];
    }
    let mut nodes = Vec::new();
    for item in items {
        nodes.push(Node::ItemTitle(or_placeholder(&item.title, "Title")));
        let meta: Vec<&str> = [item.subtitle.as_str(), item.dates.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if !meta.is_empty() {
            nodes.push(Node::Meta(meta.join(" | ")));
        }
        if !item.description.trim().is_empty() {
            nodes.push(Node::Paragraph(paragraph(&item.description)));
        }
    }
    nodes
}

fn render_custom_tags(_section: &CustomSection, data: Option<&CustomContent>) -> Vec<Node> {
    let tags: Vec<String> = match data {
        Some(CustomContent::Tags(tags)) => tags
            .iter()
            .filter(|t| !t.name.trim().is_empty())
            .map(|t| t.name.clone())
            .collect(),
        _ => Vec::new(),
    };
    if tags.is_empty() {
        return vec![Node::Tags(vec!["Tag 1".into(), "Tag 2".into()])];
    }
    vec![Node::Tags(tags)]
}
