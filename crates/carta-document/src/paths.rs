// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// First free path for `file_name` inside `dir`.
///
/// `report.pdf` becomes `report_1.pdf`, `report_2.pdf`, ... when taken. The
/// counter always starts from the original name, never from a suffixed one.
pub fn unique_destination(dir: &Path, file_name: impl AsRef<OsStr>) -> PathBuf {
    let file_name = Path::new(file_name.as_ref());
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name.file_stem().unwrap_or_default();
    let extension = file_name.extension();

    let mut counter: u32 = 1;
    loop {
        let mut name = OsString::from(stem);
        name.push(format!("_{counter}"));
        if let Some(extension) = extension {
            name.push(".");
            name.push(extension);
        }
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
