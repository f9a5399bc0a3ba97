// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pdfium-backed page rasteriser. The shared library is bound at runtime, so
// a missing library makes the backend unavailable instead of failing the
// build or the process.

use std::path::Path;

use carta_core::error::CartaError;
use image::RgbaImage;
use pdfium_render::prelude::*;
use tracing::{debug, info, instrument};

use super::{PageRasterizer, RasterPage};

/// Renders pages through a runtime-bound Pdfium library.
pub struct PdfiumRasterizer {
    pdfium: Option<Pdfium>,
}

impl PdfiumRasterizer {
    /// Bind Pdfium from `library_dir` when given, otherwise from the system
    /// library search path. Never fails; check [`PageRasterizer::available`].
    pub fn bind(library_dir: Option<&Path>) -> Self {
        let bindings = match library_dir {
            Some(dir) => {
                Pdfium::bind_to_library(&Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        };

        match bindings {
            Ok(bindings) => {
                info!("Pdfium library bound");
                Self {
                    pdfium: Some(Pdfium::new(bindings)),
                }
            }
            Err(err) => {
                debug!(error = ?err, "Pdfium library not available");
                Self { pdfium: None }
            }
        }
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn available(&self) -> bool {
        self.pdfium.is_some()
    }

    #[instrument(skip_all, fields(path = %source.display(), scale = scale))]
    fn rasterize(
        &self,
        source: &Path,
        scale: f32,
        on_page: &mut dyn FnMut(RasterPage) -> Result<(), CartaError>,
    ) -> Result<(), CartaError> {
        let pdfium = self.pdfium.as_ref().ok_or_else(|| {
            CartaError::BackendUnavailable("Pdfium library is not bound".into())
        })?;

        let document = pdfium.load_pdf_from_file(source, None).map_err(|err| {
            CartaError::RasterError(format!("cannot open {}: {:?}", source.display(), err))
        })?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);

        for (index, page) in document.pages().iter().enumerate() {
            let width_pt = page.width().value;
            let height_pt = page.height().value;

            let bitmap = page.render_with_config(&render_config).map_err(|err| {
                CartaError::RasterError(format!("page {}: {:?}", index + 1, err))
            })?;
            let (px_w, px_h) = (bitmap.width() as u32, bitmap.height() as u32);

            let rgba = RgbaImage::from_raw(px_w, px_h, bitmap.as_rgba_bytes()).ok_or_else(
                || {
                    CartaError::RasterError(format!(
                        "page {}: bitmap buffer does not match {}x{}",
                        index + 1,
                        px_w,
                        px_h
                    ))
                },
            )?;
            let image = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

            debug!(page = index + 1, px_w, px_h, "Page rendered");
            on_page(RasterPage {
                width_pt,
                height_pt,
                image,
            })?;
        }

        Ok(())
    }
}
