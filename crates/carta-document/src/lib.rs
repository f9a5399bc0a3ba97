// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// carta-document: Document processing for the Carta collector.
//
// Provides the size-driven PDF compression pipeline (structural rewrite, then
// rasterize-and-recompress), office-to-PDF conversion backends, and the batch
// driver that copies a folder tree of documents into the output folder.

pub mod batch;
pub mod compress;
pub mod convert;
pub mod image;
pub mod paths;
pub mod pdf;
pub mod raster;

#[cfg(test)]
mod testutil;

// Re-export the primary structs so callers can use `carta_document::BatchProcessor` etc.
pub use batch::{BackendStatus, BatchProcessor, ScanReport, find_documents};
pub use compress::{CompressionPipeline, CompressionTier, size_exceeds_threshold};
pub use convert::{ConverterChain, DocumentConverter};
pub use pdf::{PdfReader, PdfWriter};
pub use raster::PageRasterizer;
