// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Office document to PDF conversion.
//
// Converters are tried in order. The chain always prefers the backend that
// preserves the most of the document: a real office suite first, then a
// text-only rendition as the last resort.

pub mod office;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use carta_core::error::{CartaError, Result};
use carta_core::{DocumentKind, PaperSize};
use tracing::{debug, info, instrument, warn};

use crate::paths::unique_destination;

pub use office::OfficeConverter;
pub use text::TextFallbackConverter;

/// A backend that turns one office document into a PDF.
pub trait DocumentConverter {
    fn name(&self) -> &'static str;

    /// Whether the backend can run in this environment.
    fn available(&self) -> bool;

    fn supports(&self, kind: DocumentKind) -> bool;

    /// Convert `source` and write the PDF to `target`, which does not exist
    /// yet. On error the caller removes whatever was left at `target`.
    fn convert(&self, source: &Path, target: &Path) -> Result<()>;
}

/// Ordered list of converters.
pub struct ConverterChain {
    converters: Vec<Box<dyn DocumentConverter>>,
}

impl ConverterChain {
    /// LibreOffice first, then the text-only fallback.
    pub fn new(paper_size: PaperSize) -> Self {
        Self::with_converters(vec![
            Box::new(OfficeConverter::new()),
            Box::new(TextFallbackConverter::new(paper_size)),
        ])
    }

    pub fn with_converters(converters: Vec<Box<dyn DocumentConverter>>) -> Self {
        Self { converters }
    }

    pub fn converters(&self) -> &[Box<dyn DocumentConverter>] {
        &self.converters
    }

    /// Convert `source` into `<stem>.pdf` inside `output_dir` (collision-free)
    /// and return the path written.
    #[instrument(skip_all, fields(source = %source.display()))]
    pub fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf> {
        let kind = DocumentKind::from_path(source)
            .filter(|kind| !kind.is_pdf())
            .ok_or_else(|| CartaError::UnsupportedDocument(source.display().to_string()))?;

        let mut target_name = source.file_stem().unwrap_or_default().to_os_string();
        target_name.push(".pdf");
        let target = unique_destination(output_dir, &target_name);

        let mut last_error = None;
        for converter in &self.converters {
            if !converter.supports(kind) {
                continue;
            }
            if !converter.available() {
                debug!(converter = converter.name(), "converter unavailable");
                continue;
            }

            match converter.convert(source, &target) {
                Ok(()) if target.is_file() => {
                    info!(
                        converter = converter.name(),
                        target = %target.display(),
                        "Converted to PDF"
                    );
                    return Ok(target);
                }
                Ok(()) => {
                    warn!(converter = converter.name(), "converter reported success but wrote nothing");
                    last_error = Some(CartaError::Conversion(format!(
                        "{} produced no output",
                        converter.name()
                    )));
                }
                Err(err) => {
                    warn!(converter = converter.name(), %err, "conversion attempt failed");
                    remove_partial(&target);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            CartaError::BackendUnavailable(format!(
                "no converter available for .{} files",
                kind.extension()
            ))
        }))
    }
}

fn remove_partial(target: &Path) {
    if target.exists() {
        if let Err(err) = fs::remove_file(target) {
            warn!(path = %target.display(), %err, "could not remove partial output");
        }
    }
}
