// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Carta.

use thiserror::Error;

/// Top-level error type for all Carta operations.
#[derive(Debug, Error)]
pub enum CartaError {
    // -- Batch errors --
    #[error("source folder does not exist: {0}")]
    SourceNotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Document errors --
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("page rasterisation failed: {0}")]
    RasterError(String),

    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("backend not available: {0}")]
    BackendUnavailable(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CartaError>;
