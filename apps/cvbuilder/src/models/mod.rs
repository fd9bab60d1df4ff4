pub mod customization;
pub mod document;

pub use customization::{ColorSlot, Customization, FontSlot, ResolvedStyle};
pub use document::{
    ContentType, CustomContent, CustomSection, Document, Page, PageId, RecordKind, SectionId,
};
