// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::Path;

use tracing::warn;

/// Whether the file at `path` is strictly larger than `threshold_bytes`.
///
/// The size is read fresh on every call. A file whose size cannot be read
/// never exceeds the threshold.
pub fn size_exceeds_threshold(path: &Path, threshold_bytes: u64) -> bool {
    match file_size(path) {
        Some(size) => size > threshold_bytes,
        None => false,
    }
}

/// Current size of `path`, or `None` (logged) when it cannot be read.
pub(crate) fn file_size(path: &Path) -> Option<u64> {
    match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.len()),
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot read file size");
            None
        }
    }
}
