// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// LibreOffice headless conversion.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use carta_core::DocumentKind;
use carta_core::error::{CartaError, Result};
use tracing::{debug, instrument};

const DEFAULT_PROGRAM: &str = "soffice";

/// Converts through `soffice --headless --convert-to pdf`.
pub struct OfficeConverter {
    program: PathBuf,
    available: OnceCell<bool>,
}

impl OfficeConverter {
    /// Use `soffice` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            available: OnceCell::new(),
        }
    }

    fn probe(&self) -> bool {
        let status = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => status.success(),
            Err(err) => {
                debug!(program = %self.program.display(), %err, "office suite not found");
                false
            }
        }
    }
}

impl Default for OfficeConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl super::DocumentConverter for OfficeConverter {
    fn name(&self) -> &'static str {
        "libreoffice"
    }

    /// Probed once, on first use.
    fn available(&self) -> bool {
        *self.available.get_or_init(|| self.probe())
    }

    fn supports(&self, kind: DocumentKind) -> bool {
        matches!(
            kind,
            DocumentKind::Doc | DocumentKind::Docx | DocumentKind::Odt
        )
    }

    #[instrument(skip_all, fields(source = %source.display()))]
    fn convert(&self, source: &Path, target: &Path) -> Result<()> {
        let parent = target
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // soffice picks the output name itself; stage it next to the target
        // so the final move is a same-directory rename.
        let staging = tempfile::Builder::new()
            .prefix(".carta-convert-")
            .tempdir_in(parent)?;

        let output = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(staging.path())
            .arg(source)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| {
                CartaError::Conversion(format!(
                    "cannot start {}: {}",
                    self.program.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            return Err(CartaError::Conversion(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let produced = staging
            .path()
            .join(source.file_name().unwrap_or_default())
            .with_extension("pdf");
        if !produced.is_file() {
            return Err(CartaError::Conversion(format!(
                "{} did not produce {}",
                self.program.display(),
                produced.display()
            )));
        }

        fs::rename(&produced, target)?;
        debug!(target = %target.display(), "office conversion finished");
        Ok(())
    }
}
