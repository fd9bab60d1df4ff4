use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cvbuilder::config::Config;
use cvbuilder::errors::BuilderError;
use cvbuilder::export::{write_atomically, PdfExporter};
use cvbuilder::layout::{EstimatingMeasurer, PageFormat};
use cvbuilder::models::Document;
use cvbuilder::session::EditorSession;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvbuilder v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&config).await {
        let notification = e.notification();
        error!(code = notification.code, "{}", notification.message);
        return Err(e).context("cvbuilder run failed");
    }
    Ok(())
}

async fn run(config: &Config) -> Result<(), BuilderError> {
    let measurer = Arc::new(EstimatingMeasurer::new(PageFormat::A4));
    let settings = config.session_settings();

    let mut session = match &config.document_path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            let document = Document::from_json(&json)?;
            info!(path = %path.display(), pages = document.pages.len(), "loaded document");
            EditorSession::open(document, measurer, settings)?
        }
        None => EditorSession::new(&config.template_id, measurer, settings)?,
    };

    let splits = session.settle_layout(config.max_layout_cycles);
    info!(
        splits,
        pages = session.document().pages.len(),
        "layout ready"
    );

    let exporter = PdfExporter::new(PageFormat::A4);
    let bytes = session.export(&exporter).await?;
    write_atomically(bytes, &config.output_path).await?;
    session.leave();

    info!(path = %config.output_path.display(), "CV exported");
    Ok(())
}
