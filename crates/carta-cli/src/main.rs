// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Carta: batch office-document collector.
//
// Entry point. Parses arguments, initialises logging, asks for the source
// folder when none was given, runs the batch and prints the summary.

mod args;
mod services;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use carta_core::error::CartaError;
use carta_core::human_errors::humanize_error;
use carta_core::AppConfig;
use carta_document::BatchProcessor;
use clap::Parser;

use args::Args;
use services::prompt::{prompt_for_source, wait_for_enter};
use services::summary::render_summary;

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_filter())),
        )
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Carta starting");

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "batch aborted");
            let human = humanize_error(&err);
            eprintln!("\nError: {}\n  {}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, CartaError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    println!("{}", "=".repeat(60));
    println!("CARTA: document collector");
    println!("   Supports: .doc, .docx, .odt, .pdf");
    println!("{}", "=".repeat(60));

    let (source, prompted) = match &args.source {
        Some(source) => (source.clone(), false),
        None => match ask_for_source()? {
            Some(source) => (source, true),
            None => {
                println!("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
        },
    };

    let processor = BatchProcessor::new(config);
    println!("\nSource folder: {}", source.display());
    println!("Output folder: {}", processor.config().output_dir.display());

    let missing: Vec<_> = processor
        .backend_report()
        .into_iter()
        .filter(|status| !status.available)
        .collect();
    if !missing.is_empty() {
        println!("\nNot available (those steps will be skipped):");
        for status in &missing {
            println!("   - {}", status.component);
        }
    }

    let summary = processor.run(&source)?;
    print!("{}", render_summary(&summary, &processor.config().output_dir));

    if prompted && !args.no_wait && io::stdin().is_terminal() {
        wait_for_enter(&mut io::stdin().lock(), &mut io::stdout())?;
    }
    Ok(ExitCode::SUCCESS)
}

fn ask_for_source() -> io::Result<Option<PathBuf>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_for_source(&mut input, &mut output)
}
