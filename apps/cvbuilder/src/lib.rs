// CV builder core: template registry, document model, section management,
// rendering, overflow pagination and PDF export.

pub mod config;
pub mod errors;
pub mod export;
pub mod layout;
pub mod models;
pub mod render;
pub mod sections;
pub mod session;
pub mod templates;
