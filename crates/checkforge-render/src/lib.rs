//! CheckForge Render Library
//!
//! Turns preview trees into SVG, rasterizes them and wraps the bitmap in a
//! single-page check PDF. [`Exporter`] runs the whole export.

mod export;
mod pdf;
mod raster;
mod svg;

pub use export::{DEFAULT_SCALE, ExportOutcome, Exporter};
pub use pdf::{CHECK_PAGE_HEIGHT_PT, CHECK_PAGE_WIDTH_PT, build_check_pdf};
pub use raster::{RasterImage, Rasterizer, ResvgRasterizer};
pub use svg::to_svg;

use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid SVG: {0}")]
    Svg(String),
    #[error("Rasterization failed: {0}")]
    Raster(String),
    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl From<RenderError> for checkforge_core::ExportError {
    fn from(e: RenderError) -> Self {
        checkforge_core::ExportError::Rasterization(e.to_string())
    }
}
