// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use carta_core::error::{CartaError, Result};
use tracing::{debug, info};

use crate::paths::unique_destination;

/// Copy `source` into `output_dir` under a collision-free name.
///
/// Permissions are copied with the contents; the modification time is
/// carried over when the platform allows it.
pub fn copy_to_destination(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| CartaError::UnsupportedDocument(source.display().to_string()))?;
    let target = unique_destination(output_dir, file_name);

    fs::copy(source, &target)?;

    if let Err(err) = fs::metadata(source)
        .and_then(|metadata| metadata.modified())
        .and_then(|modified| File::options().write(true).open(&target)?.set_modified(modified))
    {
        debug!(%err, "modification time not preserved");
    }

    info!(
        from = %source.display(),
        to = %target.display(),
        "Copied"
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::file_names;

    #[test]
    fn copies_bytes_under_the_same_name() {
        let input = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        let source = input.path().join("verbale.odt");
        fs::write(&source, b"contents").expect("write");

        let target = copy_to_destination(&source, output.path()).expect("copy");

        assert_eq!(target, output.path().join("verbale.odt"));
        assert_eq!(fs::read(&target).expect("read"), b"contents");
        assert_eq!(fs::read(&source).expect("read"), b"contents");
    }

    #[test]
    fn second_copy_gets_a_counter() {
        let input = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        let source = input.path().join("verbale.pdf");
        fs::write(&source, b"one").expect("write");

        copy_to_destination(&source, output.path()).expect("first");
        copy_to_destination(&source, output.path()).expect("second");
        copy_to_destination(&source, output.path()).expect("third");

        assert_eq!(
            file_names(output.path()),
            vec!["verbale.pdf", "verbale_1.pdf", "verbale_2.pdf"]
        );
    }

    #[test]
    fn modification_time_is_preserved() {
        let input = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        let source = input.path().join("old.doc");
        fs::write(&source, b"legacy").expect("write");
        let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000_000);
        File::options()
            .write(true)
            .open(&source)
            .expect("open")
            .set_modified(past)
            .expect("set mtime");

        let target = copy_to_destination(&source, output.path()).expect("copy");
        let modified = fs::metadata(&target).expect("stat").modified().expect("mtime");
        assert_eq!(modified, past);
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let input = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        let err = copy_to_destination(&input.path().join("ghost.pdf"), output.path()).unwrap_err();
        assert!(matches!(err, CartaError::Io(_)));
        assert!(file_names(output.path()).is_empty());
    }
}
