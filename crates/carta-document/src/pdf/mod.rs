// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: structural rewriting, image-only page assembly and text PDFs.

pub mod image_pages;
pub mod reader;
pub mod writer;

pub use image_pages::ImagePageDocument;
pub use reader::{PdfReader, RecompressStats};
pub use writer::PdfWriter;
