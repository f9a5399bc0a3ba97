// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for the end-of-run summary.
//
// Every technical error and every rejected compression tier is mapped to plain
// language with a suggestion. Severity picks the marker the CLI summary puts
// in front of the line.

use crate::error::CartaError;
use crate::types::{TierFailure, TierUsed};

/// Severity of a problem from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected outcome worth mentioning (e.g. a PDF that could not be shrunk).
    Info,
    /// User must do something (install a backend, fix a path).
    ActionRequired,
    /// Cannot be fixed by the user: damaged or unsupported file.
    Permanent,
}

/// A human-readable message with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (one line).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `CartaError` into a `HumanError`.
pub fn humanize_error(err: &CartaError) -> HumanError {
    match err {
        CartaError::SourceNotFound(path) => HumanError {
            message: format!("The folder {path} does not exist."),
            suggestion: "Check the path (paste it without surrounding quotes) and try again.".into(),
            severity: Severity::ActionRequired,
        },

        CartaError::Config(detail) => HumanError {
            message: "The configuration file is not valid.".into(),
            suggestion: format!("Fix the setting and run again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        CartaError::UnsupportedDocument(detail) => HumanError {
            message: "This type of document isn't supported.".into(),
            suggestion: format!("Save it as .docx, .odt or .pdf first. (File type: {detail})"),
            severity: Severity::Permanent,
        },

        CartaError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged. Try opening it in a PDF viewer to check it works.".into(),
            severity: Severity::Permanent,
        },

        CartaError::ImageError(_) | CartaError::RasterError(_) => HumanError {
            message: "A page of this PDF could not be turned into an image.".into(),
            suggestion: "The copy was kept as it was. A dedicated PDF optimiser may do better.".into(),
            severity: Severity::Info,
        },

        CartaError::Conversion(_) => HumanError {
            message: "The document could not be converted to PDF.".into(),
            suggestion: "The original copy was kept. Open it in a word processor and export it as PDF.".into(),
            severity: Severity::Info,
        },

        CartaError::BackendUnavailable(detail) => HumanError {
            message: "A helper program needed for this step is not installed.".into(),
            suggestion: format!(
                "Install LibreOffice (conversion) or Pdfium (image compression); everything else still works. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        CartaError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted while the batch was running.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Carta doesn't have permission to read or write that file.".into(),
                suggestion: "Check the permissions of the source and output folders.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                severity: Severity::ActionRequired,
            },
        },

        CartaError::Serialization(_) => HumanError {
            message: "The configuration file is not valid JSON.".into(),
            suggestion: "Check the file for missing commas or quotes.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

/// Explain why a compression tier left the file alone.
pub fn humanize_tier_failure(tier: TierUsed, failure: &TierFailure) -> HumanError {
    match failure {
        TierFailure::Unavailable => HumanError {
            message: format!("The {tier} compressor is not available."),
            suggestion: "Install the Pdfium library to enable image-based compression.".into(),
            severity: Severity::Info,
        },
        TierFailure::Backend(detail) => HumanError {
            message: format!("The {tier} compressor could not process this PDF."),
            suggestion: format!("The file was left unchanged. ({detail})"),
            severity: Severity::Info,
        },
        TierFailure::NoBenefit { .. } if tier == TierUsed::Structural => HumanError {
            message: "The PDF could not be optimised with basic methods.".into(),
            suggestion: "PDFs made mostly of images need a specialised optimiser.".into(),
            severity: Severity::Info,
        },
        TierFailure::NoBenefit { .. } => HumanError {
            message: format!("The {tier} compressor did not save enough space."),
            suggestion: "The file was left unchanged.".into(),
            severity: Severity::Info,
        },
        TierFailure::Filesystem(detail) => HumanError {
            message: "The compressed copy could not be saved.".into(),
            suggestion: format!("Check free disk space and folder permissions. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_action_required() {
        let human = humanize_error(&CartaError::SourceNotFound("/nope".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.message.contains("/nope"));
    }

    #[test]
    fn damaged_pdf_is_permanent() {
        let human = humanize_error(&CartaError::PdfError("bad xref".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn io_not_found_is_action_required() {
        let err = CartaError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn structural_no_benefit_suggests_specialised_tool() {
        let failure = TierFailure::NoBenefit {
            original_size: 100,
            compressed_size: 100,
        };
        let human = humanize_tier_failure(TierUsed::Structural, &failure);
        assert_eq!(human.severity, Severity::Info);
        assert!(human.suggestion.contains("specialised"));
    }

    #[test]
    fn filesystem_failure_needs_attention() {
        let human =
            humanize_tier_failure(TierUsed::Rasterized, &TierFailure::Filesystem("EACCES".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
