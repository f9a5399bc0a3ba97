// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Carta document collector.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Office document kinds the collector picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Legacy binary Word document.
    Doc,
    /// Office Open XML word-processing document.
    Docx,
    /// OpenDocument text.
    Odt,
    Pdf,
}

impl DocumentKind {
    /// Infer the document kind from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "odt" => Some(Self::Odt),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Infer the document kind from a path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical lower-case extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Odt => "odt",
            Self::Pdf => "pdf",
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

/// Standard paper sizes for generated text PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
        }
    }
}

// -- Compression pipeline -----------------------------------------------------

/// Which compression tier produced the final file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierUsed {
    /// No tier was committed; the file is as it was.
    None,
    /// Lossless-oriented structural rewrite.
    Structural,
    /// Lossy rasterize-and-recompress fallback.
    Rasterized,
}

impl std::fmt::Display for TierUsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Structural => "structural",
            Self::Rasterized => "rasterized",
        };
        f.write_str(label)
    }
}

/// Why a tier did not replace the original file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierFailure {
    /// The tier's backend is not present in this environment.
    Unavailable,
    /// The source could not be parsed, rendered, or written.
    Backend(String),
    /// The tier finished but did not meet its acceptance threshold.
    NoBenefit {
        original_size: u64,
        compressed_size: u64,
    },
    /// A stat, delete, or rename failed.
    Filesystem(String),
}

impl TierFailure {
    /// Filesystem failures leave the on-disk state in doubt; the pipeline
    /// stops escalating when it sees one.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Filesystem(_))
    }
}

impl std::fmt::Display for TierFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => f.write_str("backend unavailable"),
            Self::Backend(detail) => write!(f, "backend failure: {detail}"),
            Self::NoBenefit {
                original_size,
                compressed_size,
            } => write!(
                f,
                "no benefit: {compressed_size} bytes vs {original_size} bytes original"
            ),
            Self::Filesystem(detail) => write!(f, "filesystem failure: {detail}"),
        }
    }
}

/// Outcome of a single tier attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierOutcome {
    /// The tier output replaced the original.
    Accepted {
        original_size: u64,
        compressed_size: u64,
    },
    Rejected(TierFailure),
}

impl TierOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Record of one tier attempt, kept in the result for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAttempt {
    pub tier: TierUsed,
    pub outcome: TierOutcome,
}

/// Notice attached to a result when the committed tier discarded content.
pub const FIDELITY_LOSS_NOTICE: &str =
    "pages were replaced by compressed images; text is no longer selectable or searchable";

/// Result of one `optimize` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub succeeded: bool,
    pub final_path: PathBuf,
    pub tier_used: TierUsed,
    /// Size on disk when the pipeline started (0 if it could not be read).
    pub original_size: u64,
    /// Size on disk when the pipeline finished.
    pub final_size: u64,
    /// Tiers in the order they were attempted.
    pub attempts: Vec<TierAttempt>,
    /// Set when the committed tier lost text or vector fidelity.
    pub fidelity_notice: Option<String>,
}

impl CompressionResult {
    /// Result for a file the pipeline left alone.
    pub fn untouched(path: PathBuf, size: u64, attempts: Vec<TierAttempt>) -> Self {
        Self {
            succeeded: false,
            final_path: path,
            tier_used: TierUsed::None,
            original_size: size,
            final_size: size,
            attempts,
            fidelity_notice: None,
        }
    }

    /// Percentage saved relative to the original size.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.final_size as f64 / self.original_size as f64) * 100.0
    }

    /// Whether `tier` was attempted during this run.
    pub fn attempted(&self, tier: TierUsed) -> bool {
        self.attempts.iter().any(|attempt| attempt.tier == tier)
    }
}

// -- Batch driver -------------------------------------------------------------

/// What happened to one source document during a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub kind: DocumentKind,
    /// Where the copy landed, if the copy succeeded.
    pub copied_to: Option<PathBuf>,
    /// Present when the copy was a PDF above the size threshold.
    pub compression: Option<CompressionResult>,
    /// Path of the PDF produced from a non-PDF document.
    pub converted_to: Option<PathBuf>,
    /// Why no converter could produce a PDF; the copy is kept.
    pub conversion_error: Option<String>,
    /// Error text for a failed copy.
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(source: PathBuf, kind: DocumentKind) -> Self {
        Self {
            source,
            kind,
            copied_to: None,
            compression: None,
            converted_to: None,
            conversion_error: None,
            error: None,
        }
    }

    /// Whether the compression pipeline committed a smaller file.
    pub fn was_optimized(&self) -> bool {
        self.compression
            .as_ref()
            .map(|result| result.succeeded)
            .unwrap_or(false)
    }
}

/// Totals for a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub found: usize,
    pub skipped: Vec<PathBuf>,
    pub copied: usize,
    pub pdfs_optimized: usize,
    pub converted: usize,
    pub conversion_failures: usize,
    pub errors: usize,
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    /// Fold one file's outcome into the totals.
    pub fn record(&mut self, report: FileReport) {
        if report.copied_to.is_some() {
            self.copied += 1;
        } else {
            self.errors += 1;
        }
        if report.was_optimized() {
            self.pdfs_optimized += 1;
        }
        if report.converted_to.is_some() {
            self.converted += 1;
        }
        if report.conversion_error.is_some() {
            self.conversion_failures += 1;
        }
        self.files.push(report);
    }
}
