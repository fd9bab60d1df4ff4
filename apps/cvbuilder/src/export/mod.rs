//! Export collaborator interface.
//!
//! The core hands an [`Exporter`] fully laid-out print-mode pages and gets back the
//! file bytes or an error. Exporters must keep page order and content as given.

pub mod pdf;

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::ExportError;
use crate::render::RenderedPage;

pub use pdf::PdfExporter;

#[async_trait]
pub trait Exporter: Send + Sync {
    /// One output page per input page, in input order.
    async fn export(&self, pages: &[RenderedPage]) -> Result<Bytes, ExportError>;
}

/// Temporary print-mode render held open for the duration of an export.
/// Dropping it discards the pages.
#[derive(Debug)]
pub struct PrintSurface {
    pages: Vec<RenderedPage>,
}

impl PrintSurface {
    pub fn new(pages: Vec<RenderedPage>) -> Self {
        debug!(pages = pages.len(), "opened print surface");
        Self { pages }
    }

    pub fn pages(&self) -> &[RenderedPage] {
        &self.pages
    }
}

impl Drop for PrintSurface {
    fn drop(&mut self) {
        debug!(pages = self.pages.len(), "discarded print surface");
    }
}

/// Writes `bytes` to `path` through a temp file in the same directory, so a
/// failed write never leaves a partial file at `path`.
pub async fn write_atomically(bytes: Bytes, path: &Path) -> Result<(), ExportError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<(), ExportError> {
        use std::io::Write;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote export");
        Ok(())
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_atomically_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cv.pdf");
        std::fs::write(&target, b"old").unwrap();

        write_atomically(Bytes::from_static(b"%PDF-1.7 new"), &target)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.7 new");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("cv.pdf");
        let err = write_atomically(Bytes::from_static(b"x"), &target).await.unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(!target.exists());
    }
}
