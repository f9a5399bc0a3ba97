// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-of-run report.

use std::fmt::Write;
use std::path::Path;

use carta_core::human_errors::{Severity, humanize_tier_failure};
use carta_core::{BatchSummary, CompressionResult, FileReport, TierOutcome};

const RULE_WIDTH: usize = 60;

fn mebibytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Line marker: `-` for expected outcomes, `!` when the user can act, `x`
/// when nothing can be done.
fn severity_marker(severity: Severity) -> char {
    match severity {
        Severity::Info => '-',
        Severity::ActionRequired => '!',
        Severity::Permanent => 'x',
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Totals followed by one line per file that needs a mention.
pub fn render_summary(summary: &BatchSummary, output_dir: &Path) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "   Documents found:    {}", summary.found);
    let _ = writeln!(out, "   Skipped by name:    {}", summary.skipped.len());
    let _ = writeln!(out, "   Copied:             {}", summary.copied);
    let _ = writeln!(out, "   PDFs optimised:     {}", summary.pdfs_optimized);
    let _ = writeln!(out, "   Converted to PDF:   {}", summary.converted);
    let _ = writeln!(out, "   Not converted:      {}", summary.conversion_failures);
    let _ = writeln!(out, "   Errors:             {}", summary.errors);
    let _ = writeln!(out, "   Output folder:      {}", output_dir.display());

    let details: Vec<String> = summary.files.iter().flat_map(file_lines).collect();
    if !details.is_empty() {
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for line in details {
            let _ = writeln!(out, "{line}");
        }
    }
    let _ = writeln!(out, "{rule}");
    out
}

fn file_lines(report: &FileReport) -> Vec<String> {
    let name = display_name(&report.source);
    let mut lines = Vec::new();

    if let Some(error) = &report.error {
        lines.push(format!("   {name}: not copied ({error})"));
        return lines;
    }
    if let Some(compression) = &report.compression {
        lines.extend(compression_lines(&name, compression));
    }
    if let Some(pdf) = &report.converted_to {
        lines.push(format!("   {name}: converted to {}", display_name(pdf)));
    }
    if let Some(error) = &report.conversion_error {
        lines.push(format!("   {name}: kept as-is, could not convert ({error})"));
    }
    lines
}

fn compression_lines(name: &str, result: &CompressionResult) -> Vec<String> {
    let mut lines = Vec::new();

    if result.succeeded {
        lines.push(format!(
            "   {name}: {:.1} MB -> {:.1} MB (-{:.1}%, {})",
            mebibytes(result.original_size),
            mebibytes(result.final_size),
            result.reduction_percent(),
            result.tier_used
        ));
        if let Some(notice) = &result.fidelity_notice {
            lines.push(format!("      note: {notice}"));
        }
        return lines;
    }

    lines.push(format!(
        "   {name}: {:.1} MB, could not be reduced",
        mebibytes(result.original_size)
    ));
    for attempt in &result.attempts {
        if let TierOutcome::Rejected(failure) = &attempt.outcome {
            let human = humanize_tier_failure(attempt.tier, failure);
            lines.push(format!(
                "      {} {} {}",
                severity_marker(human.severity),
                human.message,
                human.suggestion
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_core::{DocumentKind, FIDELITY_LOSS_NOTICE, TierAttempt, TierFailure, TierUsed};
    use std::path::PathBuf;

    const MIB: u64 = 1024 * 1024;

    fn copied(name: &str, kind: DocumentKind) -> FileReport {
        let mut report = FileReport::new(PathBuf::from("/in").join(name), kind);
        report.copied_to = Some(PathBuf::from("/out").join(name));
        report
    }

    #[test]
    fn totals_are_listed() {
        let mut summary = BatchSummary::default();
        summary.found = 3;
        summary.copied = 3;
        summary.converted = 1;

        let text = render_summary(&summary, Path::new("/out"));
        assert!(text.contains("Documents found:    3"));
        assert!(text.contains("Converted to PDF:   1"));
        assert!(text.contains("Output folder:      /out"));
    }

    #[test]
    fn rasterized_result_carries_the_fidelity_notice() {
        let mut report = copied("scan.pdf", DocumentKind::Pdf);
        let mut result = CompressionResult::untouched(PathBuf::from("/out/scan.pdf"), 50 * MIB, Vec::new());
        result.succeeded = true;
        result.tier_used = TierUsed::Rasterized;
        result.final_size = 40 * MIB;
        result.fidelity_notice = Some(FIDELITY_LOSS_NOTICE.to_string());
        report.compression = Some(result);

        let mut summary = BatchSummary::default();
        summary.record(report);
        let text = render_summary(&summary, Path::new("/out"));

        assert!(text.contains("scan.pdf: 50.0 MB -> 40.0 MB (-20.0%, rasterized)"));
        assert!(text.contains(FIDELITY_LOSS_NOTICE));
    }

    #[test]
    fn failed_compression_explains_each_tier() {
        let mut report = copied("heavy.pdf", DocumentKind::Pdf);
        let attempts = vec![
            TierAttempt {
                tier: TierUsed::Structural,
                outcome: TierOutcome::Rejected(TierFailure::NoBenefit {
                    original_size: 45 * MIB,
                    compressed_size: 45 * MIB,
                }),
            },
            TierAttempt {
                tier: TierUsed::Rasterized,
                outcome: TierOutcome::Rejected(TierFailure::Unavailable),
            },
        ];
        report.compression = Some(CompressionResult::untouched(
            PathBuf::from("/out/heavy.pdf"),
            45 * MIB,
            attempts,
        ));

        let mut summary = BatchSummary::default();
        summary.record(report);
        let text = render_summary(&summary, Path::new("/out"));

        assert!(text.contains("heavy.pdf: 45.0 MB, could not be reduced"));
        assert!(text.contains("      - The PDF could not be optimised with basic methods."));
        assert!(text.contains("Pdfium"));
    }

    #[test]
    fn failures_needing_attention_are_flagged() {
        let mut report = copied("locked.pdf", DocumentKind::Pdf);
        let attempts = vec![TierAttempt {
            tier: TierUsed::Structural,
            outcome: TierOutcome::Rejected(TierFailure::Filesystem("permission denied".into())),
        }];
        report.compression = Some(CompressionResult::untouched(
            PathBuf::from("/out/locked.pdf"),
            45 * MIB,
            attempts,
        ));

        let mut summary = BatchSummary::default();
        summary.record(report);
        let text = render_summary(&summary, Path::new("/out"));

        assert!(text.contains("      ! The compressed copy could not be saved."));
    }

    #[test]
    fn conversion_outcomes_are_reported() {
        let mut converted = copied("letter.docx", DocumentKind::Docx);
        converted.converted_to = Some(PathBuf::from("/out/letter.pdf"));
        let mut kept = copied("legacy.doc", DocumentKind::Doc);
        kept.conversion_error = Some("no converter available for .doc files".into());

        let mut summary = BatchSummary::default();
        summary.record(converted);
        summary.record(kept);
        let text = render_summary(&summary, Path::new("/out"));

        assert!(text.contains("letter.docx: converted to letter.pdf"));
        assert!(text.contains("legacy.doc: kept as-is"));
    }

    #[test]
    fn quiet_run_has_no_detail_section() {
        let mut summary = BatchSummary::default();
        summary.record(copied("plain.pdf", DocumentKind::Pdf));
        let text = render_summary(&summary, Path::new("/out"));
        assert!(!text.contains("---"));
    }
}
