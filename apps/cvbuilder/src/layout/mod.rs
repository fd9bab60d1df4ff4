// Layout engine: text flow, height measurement, overflow pagination and the
// debounced trigger that drives it.

pub mod debounce;
pub mod flow;
pub mod font_metrics;
pub mod measure;
pub mod paginate;

pub use debounce::OverflowDebouncer;
pub use flow::{flow_page, FlowLine, PageFlow, PageFormat};
pub use font_metrics::FontClass;
pub use measure::{EstimatingMeasurer, MeasureRequest, PageMeasurer, SyntheticMeasurer};
pub use paginate::{check_overflow, redistribute_all, split_page, OverflowVerdict};

/// Content-height budget of one A4 page with 20mm margins, in CSS px.
pub const DEFAULT_PAGE_BUDGET_PX: f32 = 971.0;
