//! PDF export of the record store
//!
//! The pipeline is store → [`flowables`] → [`layout`] → [`pdf`]. Every stage
//! is in-memory and synchronous; the caller gets either the finished file or
//! a [`DocumentBuildError`], never a partial document.

pub mod flowables;
pub mod layout;
pub mod link;
pub mod markup;
pub mod pdf;

use crate::core::config::ExportConfig;
use crate::core::record::RecordStore;

use self::layout::PageGeometry;
use self::link::DownloadLink;
use self::markup::MarkupError;

#[derive(Debug, thiserror::Error)]
pub enum DocumentBuildError {
    #[error("malformed paragraph markup: {0}")]
    Markup(#[from] MarkupError),
    #[error("PDF backend failed: {0}")]
    Backend(#[from] printpdf::Error),
}

/// Page and naming settings for one export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub title: String,
    pub file_name: String,
    pub geometry: PageGeometry,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        let (width, height) = config.page_size.dimensions();
        Self {
            title: config.title.clone(),
            file_name: config.file_name.clone(),
            geometry: PageGeometry {
                width,
                height,
                margin: config.margin,
            },
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

/// A finished export, ready to be saved or linked
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub link: DownloadLink,
}

/// Render the whole store to PDF bytes
pub fn build_document(store: &RecordStore, options: &ExportOptions) -> Result<Vec<u8>, DocumentBuildError> {
    let flow = flowables::build_flowables(store);
    let pages = layout::layout(&flow, &options.geometry)?;
    let bytes = pdf::write_pdf(&options.title, &pages, &options.geometry)?;

    tracing::info!(
        "Built {} ({} pages, {} bytes)",
        options.file_name,
        pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Render the store and wrap the result with its download link
pub fn build_artifact(store: &RecordStore, options: &ExportOptions) -> Result<ExportArtifact, DocumentBuildError> {
    let bytes = build_document(store, options)?;
    Ok(ExportArtifact {
        link: DownloadLink::pdf(&bytes, &options.file_name),
        file_name: options.file_name.clone(),
        bytes,
    })
}
