// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text-only conversion fallback: pull paragraph text out of a DOCX or ODT
// package and lay it out on plain pages. Formatting, tables and images are
// not carried over.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use carta_core::error::{CartaError, Result};
use carta_core::{DocumentKind, PaperSize};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, instrument};

use crate::pdf::PdfWriter;

pub struct TextFallbackConverter {
    paper_size: PaperSize,
}

impl TextFallbackConverter {
    pub fn new(paper_size: PaperSize) -> Self {
        Self { paper_size }
    }
}

impl super::DocumentConverter for TextFallbackConverter {
    fn name(&self) -> &'static str {
        "text-fallback"
    }

    fn available(&self) -> bool {
        true
    }

    fn supports(&self, kind: DocumentKind) -> bool {
        matches!(kind, DocumentKind::Docx | DocumentKind::Odt)
    }

    #[instrument(skip_all, fields(source = %source.display()))]
    fn convert(&self, source: &Path, target: &Path) -> Result<()> {
        let kind = DocumentKind::from_path(source)
            .ok_or_else(|| CartaError::UnsupportedDocument(source.display().to_string()))?;
        let text = extract_text(source, kind)?;
        debug!(chars = text.chars().count(), "text extracted");

        let mut writer = PdfWriter::new(self.paper_size);
        if let Some(stem) = source.file_stem() {
            writer.set_title(stem.to_string_lossy());
        }
        writer.write_text_to_file(&text, target)
    }
}

/// Paragraph text of a DOCX or ODT file, one paragraph per line.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String> {
    let entry = match kind {
        DocumentKind::Docx => "word/document.xml",
        DocumentKind::Odt => "content.xml",
        other => {
            return Err(CartaError::UnsupportedDocument(format!(
                "no text extraction for .{} files",
                other.extension()
            )));
        }
    };

    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|err| {
        CartaError::Conversion(format!("{} is not a valid package: {}", path.display(), err))
    })?;
    let mut part = archive.by_name(entry).map_err(|err| {
        CartaError::Conversion(format!("{} has no {}: {}", path.display(), entry, err))
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    paragraphs_from_xml(&xml)
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|b| *b == b':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Markup whose text is not part of the visible document: tab stop
/// definitions, deleted runs, field instructions and the ODF change log.
fn is_hidden(name: &[u8]) -> bool {
    matches!(name, b"tabs" | b"delText" | b"instrText" | b"tracked-changes")
}

/// Walks WordprocessingML or ODF text markup. Paragraphs (`p`, ODF `h`)
/// become lines; `br`/`line-break`, `tab` and ODF `s` map to their
/// characters. Anything inside [`is_hidden`] markup is dropped.
fn paragraphs_from_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut out = String::new();
    let mut paragraph_depth = 0usize;
    let mut hidden_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                name if is_hidden(name) => hidden_depth += 1,
                _ if hidden_depth > 0 => {}
                b"p" | b"h" => paragraph_depth += 1,
                other => push_inline(&mut out, other),
            },
            Ok(Event::Empty(e)) if hidden_depth == 0 => match local_name(e.name().as_ref()) {
                b"p" | b"h" if paragraph_depth == 0 => out.push('\n'),
                other => push_inline(&mut out, other),
            },
            Ok(Event::Text(e)) if paragraph_depth > 0 && hidden_depth == 0 => {
                let text = e.unescape().map_err(|err| {
                    CartaError::Conversion(format!("malformed document text: {}", err))
                })?;
                out.push_str(&text);
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                name if is_hidden(name) => hidden_depth = hidden_depth.saturating_sub(1),
                _ if hidden_depth > 0 => {}
                b"p" | b"h" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 {
                        out.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(CartaError::Conversion(format!(
                    "malformed document XML at byte {}: {}",
                    reader.buffer_position(),
                    err
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

fn push_inline(out: &mut String, name: &[u8]) {
    match name {
        b"br" | b"cr" | b"line-break" => out.push('\n'),
        b"tab" => out.push('\t'),
        b"s" => out.push(' '),
        _ => {}
    }
}
