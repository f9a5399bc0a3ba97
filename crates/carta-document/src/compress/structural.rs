// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tier 1: lossless structural rewrite with lopdf.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use carta_core::TierUsed;
use carta_core::error::CartaError;
use tracing::{debug, instrument};

use super::tier::CompressionTier;
use crate::pdf::PdfReader;

/// Any size reduction at all, beyond a 0.1% noise margin.
pub const STRUCTURAL_ACCEPTANCE_FACTOR: f64 = 0.999;

/// Recompresses page content streams, drops unreferenced objects and
/// deflates what is left. Text and vector content survive untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralTier;

impl CompressionTier for StructuralTier {
    fn tier(&self) -> TierUsed {
        TierUsed::Structural
    }

    fn acceptance_factor(&self) -> f64 {
        STRUCTURAL_ACCEPTANCE_FACTOR
    }

    fn temp_suffix(&self) -> &'static str {
        "_temp_compressed.pdf"
    }

    fn available(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(path = %source.display()))]
    fn write_candidate(&self, source: &Path, target: &mut File) -> Result<(), CartaError> {
        let mut reader = PdfReader::open(source)?;
        let stats = reader.recompress_page_contents();
        let removed = reader.collect_garbage();

        let mut writer = BufWriter::new(target);
        reader.write_compressed(&mut writer)?;
        writer.flush()?;

        debug!(
            pages = reader.page_count(),
            skipped_pages = stats.pages_skipped,
            removed_objects = removed,
            "Structural rewrite written"
        );
        Ok(())
    }
}
