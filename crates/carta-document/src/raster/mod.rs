// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterisation backends.
//
// The rasterized compression tier does not care how pages become pixels; it
// talks to a `PageRasterizer`. The default backend binds the Pdfium shared
// library at runtime (feature "pdfium"). When no backend can be loaded the
// `NoRasterizer` placeholder reports itself unavailable and the tier is
// skipped.

#[cfg(feature = "pdfium")]
pub mod pdfium;

use std::path::Path;

use carta_core::config::CompressionConfig;
use carta_core::error::CartaError;
use image::RgbImage;

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRasterizer;

/// One rendered page.
pub struct RasterPage {
    /// Original page width in PDF points.
    pub width_pt: f32,
    /// Original page height in PDF points.
    pub height_pt: f32,
    pub image: RgbImage,
}

/// Renders the pages of a PDF, one at a time, to RGB rasters.
pub trait PageRasterizer {
    /// Short backend name for logs and the backend report.
    fn name(&self) -> &'static str;

    /// Whether the backend can render in this environment.
    fn available(&self) -> bool;

    /// Render every page of `source` at `scale` (1.0 = 72 dpi) and hand each
    /// page to `on_page` in document order. Stops at the first error,
    /// including one returned by `on_page`.
    fn rasterize(
        &self,
        source: &Path,
        scale: f32,
        on_page: &mut dyn FnMut(RasterPage) -> Result<(), CartaError>,
    ) -> Result<(), CartaError>;
}

/// Placeholder used when no rasterisation backend is compiled in or loadable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRasterizer;

impl PageRasterizer for NoRasterizer {
    fn name(&self) -> &'static str {
        "none"
    }

    fn available(&self) -> bool {
        false
    }

    fn rasterize(
        &self,
        _source: &Path,
        _scale: f32,
        _on_page: &mut dyn FnMut(RasterPage) -> Result<(), CartaError>,
    ) -> Result<(), CartaError> {
        Err(CartaError::BackendUnavailable(
            "no page rasteriser is available".into(),
        ))
    }
}

/// The best rasteriser this build and environment offer.
#[cfg(feature = "pdfium")]
pub fn default_rasterizer(config: &CompressionConfig) -> Box<dyn PageRasterizer> {
    Box::new(PdfiumRasterizer::bind(config.pdfium_library_dir.as_deref()))
}

/// The best rasteriser this build and environment offer.
#[cfg(not(feature = "pdfium"))]
pub fn default_rasterizer(_config: &CompressionConfig) -> Box<dyn PageRasterizer> {
    Box::new(NoRasterizer)
}
