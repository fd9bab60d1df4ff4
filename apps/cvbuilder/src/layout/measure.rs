//! Height measurement for overflow checks.
//!
//! The layout engine never reaches into a rendering surface directly: it asks a
//! [`PageMeasurer`] for a height and treats `None` as "not overflowing".

use std::collections::HashMap;

use tracing::debug;

use crate::layout::flow::{flow_page, PageFormat};
use crate::models::customization::Customization;
use crate::models::document::{Document, PageId};
use crate::render::{RenderMode, Renderer};
use crate::templates::Template;

/// Everything needed to measure one page.
#[derive(Clone, Copy)]
pub struct MeasureRequest<'a> {
    pub template: &'a Template,
    pub document: &'a Document,
    pub customization: &'a Customization,
    pub page: PageId,
}

pub trait PageMeasurer: Send + Sync {
    /// Rendered content height in px, or `None` when the page cannot be measured.
    fn measure(&self, request: &MeasureRequest<'_>) -> Option<f32>;
}

/// Measures by flowing the interactive render through the font metric tables.
pub struct EstimatingMeasurer {
    format: PageFormat,
    renderer: Renderer,
}

impl EstimatingMeasurer {
    pub fn new(format: PageFormat) -> Self {
        Self {
            format,
            renderer: Renderer::default(),
        }
    }
}

impl Default for EstimatingMeasurer {
    fn default() -> Self {
        Self::new(PageFormat::A4)
    }
}

impl PageMeasurer for EstimatingMeasurer {
    fn measure(&self, request: &MeasureRequest<'_>) -> Option<f32> {
        let Some(rendered) = self.renderer.render(
            request.template,
            request.document,
            request.customization,
            request.page,
            RenderMode::Interactive,
        ) else {
            debug!(page = %request.page, "page not found, measurement unavailable");
            return None;
        };
        Some(flow_page(&rendered, &self.format).height)
    }
}

/// Fixed heights per page id. Pages without an entry are unmeasurable.
#[derive(Debug, Clone, Default)]
pub struct SyntheticMeasurer {
    heights: HashMap<PageId, f32>,
}

impl SyntheticMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, page: PageId, height: f32) -> Self {
        self.heights.insert(page, height);
        self
    }

    pub fn set(&mut self, page: PageId, height: f32) {
        self.heights.insert(page, height);
    }
}

impl PageMeasurer for SyntheticMeasurer {
    fn measure(&self, request: &MeasureRequest<'_>) -> Option<f32> {
        self.heights.get(&request.page).copied()
    }
}
