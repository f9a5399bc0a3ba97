// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use carta_core::AppConfig;
use clap::Parser;

const MIB: u64 = 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "carta")]
#[command(
    author,
    version,
    about = "Collect .doc/.docx/.odt/.pdf files into one folder, convert them to PDF and shrink oversized PDFs"
)]
pub struct Args {
    /// Folder to scan (asked for interactively when omitted)
    pub source: Option<PathBuf>,

    /// Output folder (default: ~/Desktop/files)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Compress PDFs larger than this many MiB (default: 40)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threshold_mb: Option<u64>,

    /// Folder containing the Pdfium shared library
    #[arg(long)]
    pub pdfium_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and the summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Exit right after the summary instead of waiting for Enter
    #[arg(long)]
    pub no_wait: bool,
}

impl Args {
    /// Default `EnvFilter` directive when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Command-line flags win over the configuration file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(mb) = self.threshold_mb {
            config.compression.threshold_bytes = mb.saturating_mul(MIB);
        }
        if let Some(dir) = &self.pdfium_dir {
            config.compression.pdfium_library_dir = Some(dir.clone());
        }
    }
}
