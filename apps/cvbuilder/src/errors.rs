use serde::Serialize;
use thiserror::Error;

use crate::models::document::PageId;

/// Failures while turning rendered pages into an export file.
/// Any of these aborts the whole export; no partial output is kept.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Rasterization failed for page {page_id}: {reason}")]
    Rasterize { page_id: PageId, reason: String },

    #[error("Nothing to export")]
    Empty,

    #[error("PDF serialization error: {0}")]
    Serialize(#[from] lopdf::Error),

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builder-level error type.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Blocking, user-visible message for a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub code: &'static str,
    pub message: String,
}

impl BuilderError {
    pub fn notification(&self) -> Notification {
        let (code, message) = match self {
            BuilderError::UnknownTemplate(id) => {
                ("UNKNOWN_TEMPLATE", format!("Template '{id}' does not exist"))
            }
            BuilderError::PageNotFound(id) => ("PAGE_NOT_FOUND", format!("Page {id} does not exist")),
            BuilderError::InvalidDocument(e) => {
                tracing::error!("Invalid document: {e}");
                (
                    "INVALID_DOCUMENT",
                    "The CV document could not be read".to_string(),
                )
            }
            BuilderError::Export(ExportError::Rasterize { page_id, reason }) => {
                tracing::error!("Rasterization failed on page {page_id}: {reason}");
                (
                    "EXPORT_FAILED",
                    "Error generating PDF. Please try again.".to_string(),
                )
            }
            BuilderError::Export(ExportError::Empty) => {
                ("EXPORT_EMPTY", "There are no pages to export".to_string())
            }
            BuilderError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    "EXPORT_FAILED",
                    "Error generating PDF. Please try again.".to_string(),
                )
            }
            BuilderError::Io(e) => {
                tracing::error!("I/O error: {e}");
                ("IO_ERROR", "The file could not be written".to_string())
            }
            BuilderError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };
        Notification { code, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_failure_is_generic_to_the_user() {
        let err = BuilderError::from(ExportError::Rasterize {
            page_id: PageId(2),
            reason: "bad color".into(),
        });
        let n = err.notification();
        assert_eq!(n.code, "EXPORT_FAILED");
        assert!(!n.message.contains("bad color"));
    }

    #[test]
    fn test_invalid_json_maps_to_invalid_document() {
        let err: BuilderError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.notification().code, "INVALID_DOCUMENT");
    }

    #[test]
    fn test_unknown_template_names_the_id() {
        let n = BuilderError::UnknownTemplate("retro".into()).notification();
        assert_eq!(n.code, "UNKNOWN_TEMPLATE");
        assert!(n.message.contains("retro"));
    }
}
