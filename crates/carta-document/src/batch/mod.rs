// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch driver: collect office documents from a folder tree into the output
// folder, shrink large PDFs and convert everything else to PDF.

pub mod copy;
pub mod processor;
pub mod scan;

pub use copy::copy_to_destination;
pub use processor::{BackendStatus, BatchProcessor};
pub use scan::{ScanReport, ScannedDocument, find_documents};
