// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CartaError, Result};

/// PDFs larger than this are handed to the compression pipeline (40 MiB).
pub const DEFAULT_THRESHOLD_BYTES: u64 = 40 * 1024 * 1024;

/// File stems (lower-cased, no extension) the scanner never collects.
pub const DEFAULT_SKIP_NAMES: [&str; 2] = ["quarta di copertina", "quartadicopertina"];

/// Settings for the PDF compression pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Files strictly larger than this many bytes are compressed.
    pub threshold_bytes: u64,
    /// Directory holding the Pdfium shared library. When unset the system
    /// library search path is used.
    pub pdfium_library_dir: Option<PathBuf>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            threshold_bytes: DEFAULT_THRESHOLD_BYTES,
            pdfium_library_dir: None,
        }
    }
}

impl CompressionConfig {
    /// Convenience constructor used by callers that only tune the threshold.
    pub fn with_threshold(threshold_bytes: u64) -> Self {
        Self {
            threshold_bytes,
            ..Self::default()
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Folder that receives copies and converted PDFs.
    pub output_dir: PathBuf,
    /// Document stems to leave behind (matched case-insensitively).
    pub skip_names: Vec<String>,
    /// Paper size for PDFs produced by the text-only conversion fallback.
    pub paper_size: crate::PaperSize,
    pub compression: CompressionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            skip_names: DEFAULT_SKIP_NAMES.iter().map(|s| s.to_string()).collect(),
            paper_size: crate::PaperSize::Letter,
            compression: CompressionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.compression.threshold_bytes == 0 {
            return Err(CartaError::Config(
                "compression threshold must be greater than zero".into(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(CartaError::Config("output folder is empty".into()));
        }
        Ok(())
    }

    /// Whether `stem` (file name without extension) is on the skip list.
    pub fn should_skip(&self, stem: &str) -> bool {
        let lowered = stem.to_lowercase();
        self.skip_names
            .iter()
            .any(|name| name.to_lowercase() == lowered)
    }
}

/// `~/Desktop/files`, falling back to the current directory when no home
/// directory is known.
pub fn default_output_dir() -> PathBuf {
    home_dir()
        .map(|home| home.join("Desktop").join("files"))
        .unwrap_or_else(|| PathBuf::from("files"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
