// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open an existing PDF with `lopdf` and rewrite its object
// structure: recompress page content streams, collect unreferenced objects,
// deflate remaining streams and serialise the result.

use std::io::Write;
use std::path::Path;

use carta_core::error::CartaError;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument, warn};

/// Per-document tally of the content-stream recompression pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecompressStats {
    /// Pages whose content streams were all processed.
    pub pages_recompressed: usize,
    /// Pages carried forward unchanged because a stream could not be handled.
    pub pages_skipped: usize,
}

/// Reads an existing PDF and rewrites it in a more compact form.
///
/// Wraps `lopdf::Document`. The reader never touches the source file after
/// [`PdfReader::open`] returns; all rewriting happens in memory and is written
/// to a caller-supplied sink.
///
/// Encrypted documents are refused: lopdf decrypts them in memory but saves
/// them without re-encrypting, which would leave a plaintext file that still
/// declares encryption.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CartaError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            CartaError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        reject_encrypted(&document, &path_ref.display().to_string())?;
        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartaError> {
        let document = Document::load_mem(data).map_err(|err| {
            CartaError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        reject_encrypted(&document, "in-memory PDF")?;
        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Number of indirect objects currently held, not counting
    /// cross-reference streams (the writer regenerates those).
    pub fn object_count(&self) -> usize {
        self.document
            .objects
            .values()
            .filter(|object| !is_xref_stream(object))
            .count()
    }

    // -- Rewriting ------------------------------------------------------------

    /// Recompress the content streams of every page with Flate.
    ///
    /// A page whose streams cannot be decoded or re-encoded keeps its content
    /// exactly as loaded; that is counted in `pages_skipped` and never fails
    /// the document.
    #[instrument(skip(self))]
    pub fn recompress_page_contents(&mut self) -> RecompressStats {
        let mut stats = RecompressStats::default();

        for (page_number, page_id) in self.document.get_pages() {
            match self.recompress_page(page_id) {
                Ok(()) => stats.pages_recompressed += 1,
                Err(err) => {
                    warn!(page_number, %err, "content stream left as-is");
                    stats.pages_skipped += 1;
                }
            }
        }

        debug!(
            recompressed = stats.pages_recompressed,
            skipped = stats.pages_skipped,
            "Content streams processed"
        );
        stats
    }

    /// Drop unreferenced objects and empty streams, then renumber what is left.
    ///
    /// Returns the number of objects removed.
    pub fn collect_garbage(&mut self) -> usize {
        let before = self.object_count();
        self.document.prune_objects();
        self.document.delete_zero_length_streams();
        self.document.renumber_objects();
        let remaining = self.object_count();
        let removed = before.saturating_sub(remaining);
        debug!(removed, remaining, "Garbage collected");
        removed
    }

    /// Deflate every stream that allows it and serialise the document.
    pub fn write_compressed<W: Write>(&mut self, target: &mut W) -> Result<(), CartaError> {
        self.document.compress();
        self.document.save_to(target).map_err(|err| {
            CartaError::PdfError(format!("failed to serialise rewritten PDF: {}", err))
        })?;
        Ok(())
    }

    // -- Helpers --------------------------------------------------------------

    /// Recompress every content stream of one page, all or nothing.
    fn recompress_page(&mut self, page_id: ObjectId) -> Result<(), CartaError> {
        let content_ids = self.document.get_page_contents(page_id);

        // Work on copies so a failure halfway through leaves the page intact.
        let mut rewritten = Vec::with_capacity(content_ids.len());
        for content_id in content_ids {
            let stream = match self.document.get_object(content_id) {
                Ok(Object::Stream(stream)) => stream,
                Ok(_) => {
                    return Err(CartaError::PdfError(format!(
                        "content {:?} is not a stream",
                        content_id
                    )));
                }
                Err(err) => {
                    return Err(CartaError::PdfError(format!(
                        "cannot resolve content {:?}: {}",
                        content_id, err
                    )));
                }
            };

            let mut candidate = stream.clone();
            if candidate.dict.has(b"Filter") {
                let plain = candidate.decompressed_content().map_err(|err| {
                    CartaError::PdfError(format!("cannot decode {:?}: {}", content_id, err))
                })?;
                candidate.set_plain_content(plain);
            }
            candidate.compress().map_err(|err| {
                CartaError::PdfError(format!("cannot deflate {:?}: {}", content_id, err))
            })?;

            // Keep whichever encoding is smaller.
            if candidate.content.len() < stream.content.len() {
                rewritten.push((content_id, candidate));
            }
        }

        for (content_id, stream) in rewritten {
            self.document
                .objects
                .insert(content_id, Object::Stream(stream));
        }
        Ok(())
    }
}

fn reject_encrypted(document: &Document, origin: &str) -> Result<(), CartaError> {
    if document.is_encrypted() || document.encryption_state.is_some() {
        return Err(CartaError::PdfError(format!(
            "{} is encrypted and cannot be rewritten",
            origin
        )));
    }
    Ok(())
}

fn is_xref_stream(object: &Object) -> bool {
    object
        .type_name()
        .map(|name| name == b"XRef")
        .unwrap_or(false)
}
