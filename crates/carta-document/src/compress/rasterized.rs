// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tier 2: render every page, re-encode as JPEG, rebuild an image-only PDF.
// Text and vector content are lost, so the acceptance bar is much higher.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use carta_core::TierUsed;
use carta_core::error::CartaError;
use tracing::{debug, instrument};

use super::tier::CompressionTier;
use crate::image::JpegPageEncoder;
use crate::pdf::ImagePageDocument;
use crate::raster::{PageRasterizer, RasterPage};

/// The rasterized output must be at least 10% smaller.
pub const RASTERIZED_ACCEPTANCE_FACTOR: f64 = 0.9;
/// Render scale on both axes, relative to 72 dpi.
pub const RASTER_SCALE: f32 = 0.8;
pub const RASTER_JPEG_QUALITY: u8 = 70;

pub struct RasterizedTier {
    rasterizer: Box<dyn PageRasterizer>,
    encoder: JpegPageEncoder,
}

impl RasterizedTier {
    pub fn new(rasterizer: Box<dyn PageRasterizer>) -> Self {
        Self {
            rasterizer,
            encoder: JpegPageEncoder::new(RASTER_JPEG_QUALITY),
        }
    }

    /// Name of the rasterisation backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.rasterizer.name()
    }
}

impl CompressionTier for RasterizedTier {
    fn tier(&self) -> TierUsed {
        TierUsed::Rasterized
    }

    fn acceptance_factor(&self) -> f64 {
        RASTERIZED_ACCEPTANCE_FACTOR
    }

    fn temp_suffix(&self) -> &'static str {
        "_temp_advanced.pdf"
    }

    fn available(&self) -> bool {
        self.rasterizer.available()
    }

    fn lossy(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(path = %source.display(), backend = self.rasterizer.name()))]
    fn write_candidate(&self, source: &Path, target: &mut File) -> Result<(), CartaError> {
        let encoder = self.encoder;
        let mut document = ImagePageDocument::new();

        self.rasterizer
            .rasterize(source, RASTER_SCALE, &mut |page: RasterPage| {
                let (px_w, px_h) = page.image.dimensions();
                let jpeg = encoder.encode(&page.image)?;
                document.push_jpeg_page(jpeg, px_w, px_h, page.width_pt, page.height_pt)
            })?;

        if document.page_count() == 0 {
            return Err(CartaError::RasterError("no pages were rendered".into()));
        }
        let pages = document.page_count();

        let mut writer = BufWriter::new(target);
        document.write_to(&mut writer)?;
        writer.flush()?;

        debug!(pages, "Rasterized rewrite written");
        Ok(())
    }
}
