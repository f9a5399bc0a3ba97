// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compression orchestrator: size gate, then each tier in order until one is
// accepted.

use std::path::Path;

use carta_core::config::CompressionConfig;
use carta_core::{CompressionResult, FIDELITY_LOSS_NOTICE, TierAttempt, TierOutcome};
use tracing::{debug, info, instrument, warn};

use super::gate::{file_size, size_exceeds_threshold};
use super::rasterized::RasterizedTier;
use super::structural::StructuralTier;
use super::tier::CompressionTier;
use crate::raster::default_rasterizer;

/// Runs a PDF through the compression tiers, least lossy first.
///
/// Holds no per-file state: every [`CompressionPipeline::optimize`] call
/// starts from a fresh stat of the file.
pub struct CompressionPipeline {
    config: CompressionConfig,
    tiers: Vec<Box<dyn CompressionTier>>,
}

impl CompressionPipeline {
    /// Structural rewrite first, then the rasterized fallback backed by the
    /// best available rasteriser.
    pub fn new(config: CompressionConfig) -> Self {
        let rasterizer = default_rasterizer(&config);
        let tiers: Vec<Box<dyn CompressionTier>> = vec![
            Box::new(StructuralTier),
            Box::new(RasterizedTier::new(rasterizer)),
        ];
        Self::with_tiers(config, tiers)
    }

    /// Build a pipeline from an explicit, ordered tier list.
    pub fn with_tiers(config: CompressionConfig, tiers: Vec<Box<dyn CompressionTier>>) -> Self {
        Self { config, tiers }
    }

    pub fn tiers(&self) -> &[Box<dyn CompressionTier>] {
        &self.tiers
    }

    /// Whether `path` is above the configured size threshold right now.
    pub fn exceeds_threshold(&self, path: &Path) -> bool {
        size_exceeds_threshold(path, self.config.threshold_bytes)
    }

    /// Shrink the PDF at `path` in place if it is above the threshold.
    ///
    /// Never returns an error: every failure is recorded in the result's
    /// attempt list and the original is kept.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn optimize(&self, path: &Path) -> CompressionResult {
        let measured = file_size(path);
        let above_threshold = measured.is_some_and(|size| size > self.config.threshold_bytes);
        let original_size = measured.unwrap_or(0);

        if !above_threshold {
            debug!(
                size = original_size,
                threshold = self.config.threshold_bytes,
                "below threshold, left as-is"
            );
            return CompressionResult::untouched(path.to_path_buf(), original_size, Vec::new());
        }

        info!(
            size = original_size,
            threshold = self.config.threshold_bytes,
            "PDF above threshold, compressing"
        );

        let mut attempts = Vec::new();
        for (index, tier) in self.tiers.iter().enumerate() {
            let label = tier.tier();

            if index > 0 && !self.exceeds_threshold(path) {
                debug!(tier = %label, "file no longer above threshold");
                break;
            }
            if !tier.available() {
                debug!(tier = %label, "tier unavailable, skipped");
                continue;
            }

            let outcome = tier.attempt(path);
            attempts.push(TierAttempt {
                tier: label,
                outcome: outcome.clone(),
            });

            match outcome {
                TierOutcome::Accepted {
                    compressed_size, ..
                } => {
                    let fidelity_notice = if tier.lossy() {
                        warn!(tier = %label, "{}", FIDELITY_LOSS_NOTICE);
                        Some(FIDELITY_LOSS_NOTICE.to_string())
                    } else {
                        None
                    };
                    info!(
                        tier = %label,
                        original_size,
                        compressed_size,
                        "compression committed"
                    );
                    return CompressionResult {
                        succeeded: true,
                        final_path: path.to_path_buf(),
                        tier_used: label,
                        original_size,
                        final_size: compressed_size,
                        attempts,
                        fidelity_notice,
                    };
                }
                TierOutcome::Rejected(failure) if failure.is_fatal() => {
                    warn!(tier = %label, %failure, "filesystem failure, compression abandoned");
                    break;
                }
                TierOutcome::Rejected(failure) => {
                    info!(tier = %label, %failure, "tier rejected");
                }
            }
        }

        let mut result = CompressionResult::untouched(path.to_path_buf(), original_size, attempts);
        result.final_size = file_size(path).unwrap_or(original_size);
        info!("no tier reduced the file, original kept");
        result
    }
}
