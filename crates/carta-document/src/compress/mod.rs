// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Size-driven PDF compression.
//
// A PDF above the configured threshold is handed to an ordered list of
// tiers, least lossy first. Each tier writes a sibling temporary file and
// only replaces the original when the result clears the tier's acceptance
// factor. The first accepted tier wins; when none is accepted the original
// is left exactly as it was.

pub mod gate;
pub mod pipeline;
pub mod rasterized;
pub mod structural;
pub mod tier;

pub use gate::size_exceeds_threshold;
pub use pipeline::CompressionPipeline;
pub use rasterized::{
    RASTER_JPEG_QUALITY, RASTER_SCALE, RASTERIZED_ACCEPTANCE_FACTOR, RasterizedTier,
};
pub use structural::{STRUCTURAL_ACCEPTANCE_FACTOR, StructuralTier};
pub use tier::{CompressionTier, attempt_tier};
