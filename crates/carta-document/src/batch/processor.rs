// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch run: scan, copy, compress, convert, count.

use std::fs;
use std::path::Path;

use carta_core::config::AppConfig;
use carta_core::error::{CartaError, Result};
use carta_core::{BatchSummary, DocumentKind, FileReport};
use tracing::{debug, info, instrument, warn};

use super::copy::copy_to_destination;
use super::scan::find_documents;
use crate::compress::CompressionPipeline;
use crate::convert::ConverterChain;

/// Availability of one optional backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStatus {
    pub component: String,
    pub available: bool,
}

/// Drives a whole batch run against one output folder.
pub struct BatchProcessor {
    config: AppConfig,
    pipeline: CompressionPipeline,
    converters: ConverterChain,
}

impl BatchProcessor {
    /// Default compression tiers and converters for `config`.
    pub fn new(config: AppConfig) -> Self {
        let pipeline = CompressionPipeline::new(config.compression.clone());
        let converters = ConverterChain::new(config.paper_size);
        Self::with_parts(config, pipeline, converters)
    }

    pub fn with_parts(
        config: AppConfig,
        pipeline: CompressionPipeline,
        converters: ConverterChain,
    ) -> Self {
        Self {
            config,
            pipeline,
            converters,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Every compression tier and converter, with whether it can run here.
    pub fn backend_report(&self) -> Vec<BackendStatus> {
        let tiers = self.pipeline.tiers().iter().map(|tier| BackendStatus {
            component: format!("{} compression", tier.tier()),
            available: tier.available(),
        });
        let converters = self
            .converters
            .converters()
            .iter()
            .map(|converter| BackendStatus {
                component: format!("{} converter", converter.name()),
                available: converter.available(),
            });
        tiers.chain(converters).collect()
    }

    /// Process every document under `source`.
    ///
    /// Only setup problems (missing source, output folder that cannot be
    /// created, unreadable source root) are errors; per-file failures are
    /// counted in the summary.
    #[instrument(skip_all, fields(source = %source.display(), output = %self.config.output_dir.display()))]
    pub fn run(&self, source: &Path) -> Result<BatchSummary> {
        if !source.is_dir() {
            return Err(CartaError::SourceNotFound(source.display().to_string()));
        }
        fs::create_dir_all(&self.config.output_dir)?;

        for status in self.backend_report() {
            if status.available {
                debug!(component = %status.component, "backend available");
            } else {
                info!(component = %status.component, "backend unavailable, skipped");
            }
        }

        let scan = find_documents(source, &self.config)?;
        let mut summary = BatchSummary {
            found: scan.documents.len(),
            skipped: scan.skipped,
            ..BatchSummary::default()
        };

        for document in &scan.documents {
            let report = self.process_file(&document.path, document.kind);
            summary.record(report);
        }

        info!(
            found = summary.found,
            copied = summary.copied,
            optimized = summary.pdfs_optimized,
            converted = summary.converted,
            errors = summary.errors,
            "Batch finished"
        );
        Ok(summary)
    }

    /// Copy one document, then compress it (PDF) or convert it (anything else).
    #[instrument(skip_all, fields(file = %source.display(), kind = ?kind))]
    pub fn process_file(&self, source: &Path, kind: DocumentKind) -> FileReport {
        let mut report = FileReport::new(source.to_path_buf(), kind);

        let copied = match copy_to_destination(source, &self.config.output_dir) {
            Ok(copied) => copied,
            Err(err) => {
                warn!(%err, "copy failed");
                report.error = Some(err.to_string());
                return report;
            }
        };
        report.copied_to = Some(copied.clone());

        if kind.is_pdf() {
            // Under-threshold files come back with no attempts; nothing to report.
            let result = self.pipeline.optimize(&copied);
            if !result.attempts.is_empty() {
                report.compression = Some(result);
            }
            return report;
        }

        match self.converters.convert(&copied, &self.config.output_dir) {
            Ok(pdf) => {
                if let Err(err) = fs::remove_file(&copied) {
                    warn!(path = %copied.display(), %err, "converted, but the copy could not be removed");
                }
                report.converted_to = Some(pdf);
            }
            Err(err) => {
                warn!(%err, "could not convert, original kept");
                report.conversion_error = Some(err.to_string());
            }
        }
        report
    }
}
