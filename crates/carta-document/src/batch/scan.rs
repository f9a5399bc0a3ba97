// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recursive document discovery.

use std::fs;
use std::path::{Path, PathBuf};

use carta_core::config::AppConfig;
use carta_core::error::{CartaError, Result};
use carta_core::DocumentKind;
use tracing::{debug, info, instrument, warn};

/// A document picked up by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDocument {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    /// Documents to process, in sorted traversal order.
    pub documents: Vec<ScannedDocument>,
    /// Documents left behind because of the skip list.
    pub skipped: Vec<PathBuf>,
}

/// Walk `root` recursively and collect every `.doc`, `.docx`, `.odt` and
/// `.pdf` file (extension matched case-insensitively).
///
/// Entries are visited in file-name order so repeated runs see the same
/// sequence. The configured output folder is never descended into, and
/// symlinked directories are not followed.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn find_documents(root: &Path, config: &AppConfig) -> Result<ScanReport> {
    if !root.is_dir() {
        return Err(CartaError::SourceNotFound(root.display().to_string()));
    }

    let output_dir = fs::canonicalize(&config.output_dir).ok();
    let mut report = ScanReport::default();
    walk(root, config, output_dir.as_deref(), &mut report)?;

    info!(
        found = report.documents.len(),
        skipped = report.skipped.len(),
        "Scan complete"
    );
    Ok(report)
}

fn walk(
    dir: &Path,
    config: &AppConfig,
    output_dir: Option<&Path>,
    report: &mut ScanReport,
) -> Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if output_dir.is_some() && fs::canonicalize(&path).ok().as_deref() == output_dir {
                debug!(path = %path.display(), "output folder not scanned");
                continue;
            }
            if let Err(err) = walk(&path, config, output_dir, report) {
                warn!(path = %path.display(), %err, "folder could not be scanned");
            }
            continue;
        }

        let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
        if !is_file {
            continue;
        }
        let Some(kind) = DocumentKind::from_path(&path) else {
            continue;
        };

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        if config.should_skip(&stem) {
            info!(file = %path.display(), "Skipped by name");
            report.skipped.push(path);
        } else {
            report.documents.push(ScannedDocument { path, kind });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, b"x").expect("write");
    }

    fn config_with_output(output: &Path) -> AppConfig {
        AppConfig {
            output_dir: output.to_path_buf(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn collects_supported_extensions_recursively_in_order() {
        let source = tempfile::tempdir().expect("tempdir");
        let root = source.path();
        touch(&root.join("b.pdf"));
        touch(&root.join("a.DOCX"));
        touch(&root.join("notes.txt"));
        touch(&root.join("sub/c.odt"));
        touch(&root.join("sub/deeper/d.doc"));
        touch(&root.join("image.png"));

        let output = tempfile::tempdir().expect("tempdir");
        let report = find_documents(root, &config_with_output(output.path())).expect("scan");

        let found: Vec<(PathBuf, DocumentKind)> = report
            .documents
            .into_iter()
            .map(|doc| (doc.path.strip_prefix(root).expect("prefix").to_path_buf(), doc.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                (PathBuf::from("a.DOCX"), DocumentKind::Docx),
                (PathBuf::from("b.pdf"), DocumentKind::Pdf),
                (PathBuf::from("sub/c.odt"), DocumentKind::Odt),
                (PathBuf::from("sub/deeper/d.doc"), DocumentKind::Doc),
            ]
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn skip_list_matches_stem_case_insensitively() {
        let source = tempfile::tempdir().expect("tempdir");
        touch(&source.path().join("Quarta di Copertina.pdf"));
        touch(&source.path().join("QUARTADICOPERTINA.docx"));
        touch(&source.path().join("copertina.pdf"));

        let output = tempfile::tempdir().expect("tempdir");
        let report =
            find_documents(source.path(), &config_with_output(output.path())).expect("scan");

        assert_eq!(report.documents.len(), 1);
        assert!(report.documents[0].path.ends_with("copertina.pdf"));
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn output_folder_inside_source_is_not_scanned() {
        let source = tempfile::tempdir().expect("tempdir");
        touch(&source.path().join("keep.pdf"));
        touch(&source.path().join("out/previous.pdf"));

        let config = config_with_output(&source.path().join("out"));
        let report = find_documents(source.path(), &config).expect("scan");

        assert_eq!(report.documents.len(), 1);
        assert!(report.documents[0].path.ends_with("keep.pdf"));
    }

    #[test]
    fn missing_root_is_source_not_found() {
        let source = tempfile::tempdir().expect("tempdir");
        let err = find_documents(&source.path().join("nope"), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CartaError::SourceNotFound(_)));
    }
}
