// Section Catalog & Manager
// Catalog of predefined sections, page section-list edits, section data drafts,
// and explicit page add/remove/duplicate.

pub mod catalog;
pub mod manager;
pub mod pages;

pub use manager::{
    add_section, commit_section, edit_section, list_available_sections, remove_section,
    reorder_section, section_data_count, SectionDescriptor, SectionDraft,
};
