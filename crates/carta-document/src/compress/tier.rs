// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The compression tier contract and the shared attempt harness.
//
// Every tier follows the same life cycle: stat the original, write a
// candidate into a sibling temporary file, compare sizes, then either
// rename the candidate over the original or delete it. Tiers only supply
// the candidate writer and their acceptance factor; the harness owns all
// filesystem side effects so that no exit path leaves a temporary behind.

use std::fs::{self, File};
use std::path::Path;

use carta_core::error::CartaError;
use carta_core::{TierFailure, TierOutcome, TierUsed};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, warn};

/// One strategy in the compression pipeline.
pub trait CompressionTier {
    /// Which tier this is, for results and logs.
    fn tier(&self) -> TierUsed;

    /// The candidate is accepted only when
    /// `compressed < original * acceptance_factor()`.
    fn acceptance_factor(&self) -> f64;

    /// Fixed tail of the temporary file name, e.g. `_temp_compressed.pdf`.
    fn temp_suffix(&self) -> &'static str;

    /// Whether the tier's backend is present in this environment.
    fn available(&self) -> bool;

    /// Whether an accepted candidate discards text or vector content.
    fn lossy(&self) -> bool {
        false
    }

    /// Write the compressed rendition of `source` into `target`.
    fn write_candidate(&self, source: &Path, target: &mut File) -> Result<(), CartaError>;

    /// Run the tier against `path`, replacing it only on acceptance.
    fn attempt(&self, path: &Path) -> TierOutcome {
        attempt_tier(self, path)
    }
}

/// Shared attempt harness used by [`CompressionTier::attempt`].
pub fn attempt_tier<T: CompressionTier + ?Sized>(tier: &T, path: &Path) -> TierOutcome {
    let label = tier.tier();
    if !tier.available() {
        debug!(tier = %label, "tier unavailable");
        return TierOutcome::Rejected(TierFailure::Unavailable);
    }

    let original = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => {
            return TierOutcome::Rejected(TierFailure::Filesystem(format!(
                "cannot read size of {}: {}",
                path.display(),
                err
            )));
        }
    };
    let original_size = original.len();

    let mut candidate = match create_sibling_temp(path, tier.temp_suffix()) {
        Ok(candidate) => candidate,
        Err(err) => {
            return TierOutcome::Rejected(TierFailure::Filesystem(format!(
                "cannot create temporary file next to {}: {}",
                path.display(),
                err
            )));
        }
    };

    if let Err(err) = tier.write_candidate(path, candidate.as_file_mut()) {
        warn!(tier = %label, %err, "tier could not produce a candidate");
        discard(candidate);
        return TierOutcome::Rejected(TierFailure::Backend(err.to_string()));
    }

    let compressed_size = match candidate
        .as_file()
        .sync_all()
        .and_then(|()| candidate.as_file().metadata())
    {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            discard(candidate);
            return TierOutcome::Rejected(TierFailure::Filesystem(format!(
                "cannot read size of candidate: {}",
                err
            )));
        }
    };

    if compressed_size == 0 {
        discard(candidate);
        return TierOutcome::Rejected(TierFailure::Backend(
            "tier produced an empty file".into(),
        ));
    }

    let limit = original_size as f64 * tier.acceptance_factor();
    if (compressed_size as f64) >= limit {
        info!(
            tier = %label,
            original_size,
            compressed_size,
            "candidate not small enough, discarded"
        );
        discard(candidate);
        return TierOutcome::Rejected(TierFailure::NoBenefit {
            original_size,
            compressed_size,
        });
    }

    // Temporary files are created owner-only; keep the original's mode.
    if let Err(err) = fs::set_permissions(candidate.path(), original.permissions()) {
        debug!(%err, "could not copy permissions onto candidate");
    }

    // A failed persist hands the temporary back inside the error; dropping
    // it deletes the file.
    match candidate.persist(path) {
        Ok(_) => {
            info!(tier = %label, original_size, compressed_size, "candidate committed");
            TierOutcome::Accepted {
                original_size,
                compressed_size,
            }
        }
        Err(err) => TierOutcome::Rejected(TierFailure::Filesystem(format!(
            "cannot replace {}: {}",
            path.display(),
            err.error
        ))),
    }
}

/// `<stem>_<random><suffix>` in the same directory as `path`.
fn create_sibling_temp(path: &Path, suffix: &str) -> std::io::Result<NamedTempFile> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    Builder::new()
        .prefix(&format!("{stem}_"))
        .suffix(suffix)
        .rand_bytes(6)
        .tempfile_in(parent)
}

fn discard(candidate: NamedTempFile) {
    let temp_path = candidate.path().to_path_buf();
    if let Err(err) = candidate.close() {
        warn!(path = %temp_path.display(), %err, "temporary file could not be removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::file_names;
    use std::io::Write;

    /// Writes `len` bytes, or fails when `len` is `None`.
    struct FixedOutput {
        len: Option<usize>,
        factor: f64,
    }

    impl CompressionTier for FixedOutput {
        fn tier(&self) -> TierUsed {
            TierUsed::Structural
        }
        fn acceptance_factor(&self) -> f64 {
            self.factor
        }
        fn temp_suffix(&self) -> &'static str {
            "_temp_compressed.pdf"
        }
        fn available(&self) -> bool {
            true
        }
        fn write_candidate(&self, _source: &Path, target: &mut File) -> Result<(), CartaError> {
            match self.len {
                Some(len) => {
                    target.write_all(&vec![b'c'; len])?;
                    Ok(())
                }
                None => {
                    target.write_all(b"partial")?;
                    Err(CartaError::PdfError("synthetic parse failure".into()))
                }
            }
        }
    }

    fn original(dir: &Path, len: usize) -> std::path::PathBuf {
        let path = dir.join("report.pdf");
        std::fs::write(&path, vec![b'o'; len]).expect("write original");
        path
    }

    #[test]
    fn accepted_candidate_replaces_original() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = original(dir.path(), 1000);
        let tier = FixedOutput {
            len: Some(500),
            factor: 0.9,
        };

        let outcome = tier.attempt(&path);
        assert_eq!(
            outcome,
            TierOutcome::Accepted {
                original_size: 1000,
                compressed_size: 500
            }
        );
        assert_eq!(std::fs::read(&path).expect("read"), vec![b'c'; 500]);
        assert_eq!(file_names(dir.path()), vec!["report.pdf"]);
    }

    #[test]
    fn boundary_size_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = original(dir.path(), 1000);
        let tier = FixedOutput {
            len: Some(900),
            factor: 0.9,
        };

        let outcome = tier.attempt(&path);
        assert_eq!(
            outcome,
            TierOutcome::Rejected(TierFailure::NoBenefit {
                original_size: 1000,
                compressed_size: 900
            })
        );
        assert_eq!(std::fs::read(&path).expect("read"), vec![b'o'; 1000]);
        assert_eq!(file_names(dir.path()), vec!["report.pdf"]);
    }

    #[test]
    fn writer_failure_removes_partial_candidate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = original(dir.path(), 1000);
        let tier = FixedOutput {
            len: None,
            factor: 0.9,
        };

        match tier.attempt(&path) {
            TierOutcome::Rejected(TierFailure::Backend(detail)) => {
                assert!(detail.contains("synthetic parse failure"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(file_names(dir.path()), vec!["report.pdf"]);
    }

    #[test]
    fn empty_candidate_is_a_backend_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = original(dir.path(), 1000);
        let tier = FixedOutput {
            len: Some(0),
            factor: 0.9,
        };

        assert!(matches!(
            tier.attempt(&path),
            TierOutcome::Rejected(TierFailure::Backend(_))
        ));
        assert_eq!(std::fs::read(&path).expect("read").len(), 1000);
    }

    #[test]
    fn missing_original_is_a_filesystem_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tier = FixedOutput {
            len: Some(10),
            factor: 0.9,
        };

        assert!(matches!(
            tier.attempt(&dir.path().join("absent.pdf")),
            TierOutcome::Rejected(TierFailure::Filesystem(_))
        ));
        assert!(file_names(dir.path()).is_empty());
    }

    #[test]
    fn temporary_name_keeps_stem_and_suffix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("annual report.pdf");
        let temp = create_sibling_temp(&path, "_temp_advanced.pdf").expect("temp");

        let name = temp
            .path()
            .file_name()
            .expect("name")
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with("annual report_"));
        assert!(name.ends_with("_temp_advanced.pdf"));
        assert_eq!(temp.path().parent(), Some(dir.path()));
    }
}
