// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JPEG encoding for rasterised pages, using the `image` crate's encoder.

use std::io::Cursor;

use carta_core::error::CartaError;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

/// Encodes page rasters as baseline RGB JPEG at a fixed quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegPageEncoder {
    quality: u8,
}

impl JpegPageEncoder {
    /// `quality` is clamped to 1..=100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode one raster, returning the JPEG bytes.
    pub fn encode(&self, raster: &RgbImage) -> Result<Vec<u8>, CartaError> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(CartaError::ImageError("cannot encode an empty raster".into()));
        }

        let mut buf = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buf, self.quality);
        raster.write_with_encoder(encoder).map_err(|err| {
            CartaError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;

        let bytes = buf.into_inner();
        debug!(
            width = raster.width(),
            height = raster.height(),
            quality = self.quality,
            bytes = bytes.len(),
            "Page raster encoded"
        );
        Ok(bytes)
    }
}
