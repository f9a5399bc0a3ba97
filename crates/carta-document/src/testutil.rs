// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic PDFs and directory helpers shared by the unit tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use carta_core::TierUsed;
use carta_core::error::CartaError;
use lopdf::content::{Content, Operation};
use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, dictionary};

use crate::compress::CompressionTier;

/// A4 in points.
pub const PAGE_WIDTH_PT: i64 = 595;
pub const PAGE_HEIGHT_PT: i64 = 842;

/// Build an uncompressed PDF with `pages` pages, each carrying `lines` copies
/// of the same text-drawing block, plus `orphans` unreferenced streams.
pub fn text_pdf_bytes(pages: usize, lines: usize, orphans: usize) -> Vec<u8> {
    save(&mut text_document(pages, lines, orphans))
}

/// `text_pdf_bytes(pages, lines, 0)` encrypted with RC4-128, owner password
/// "owner" and an empty user password, so it opens without prompting.
pub fn encrypted_text_pdf_bytes(pages: usize, lines: usize) -> Vec<u8> {
    let mut doc = text_document(pages, lines, 0);
    let file_id = Object::string_literal(b"carta-fixture-id".to_vec());
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    let version = EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password: "",
        key_length: 128,
        permissions: Permissions::all(),
    };
    let state = EncryptionState::try_from(version).expect("encryption state");
    doc.encrypt(&state).expect("encrypt fixture");
    save(&mut doc)
}

fn text_document(pages: usize, lines: usize, orphans: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages);
    for _ in 0..pages {
        let mut operations = Vec::with_capacity(lines * 5);
        for line in 0..lines {
            let y = 800 - (line as i64 % 60) * 12;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec!["F1".into(), Object::Integer(10)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(40), Object::Integer(y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(
                    "The quick brown fox jumps over the lazy dog again and again",
                )],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => media_box(),
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    for index in 0..orphans {
        let filler = vec![b'a' + (index % 26) as u8; 4096];
        doc.add_object(Stream::new(dictionary! {}, filler));
    }

    doc
}

/// Two-page PDF whose second page points its contents at a non-stream object.
pub fn pdf_with_dangling_contents() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let good_content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("ET", vec![]),
        ],
    };
    let good_id = doc.add_object(Stream::new(
        dictionary! {},
        good_content.encode().expect("encode content"),
    ));
    let not_a_stream = doc.add_object(Object::Integer(42));

    let good_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => good_id,
        "MediaBox" => media_box(),
    });
    let broken_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => vec![Object::Reference(not_a_stream)],
        "MediaBox" => media_box(),
    });

    let kids: Vec<Object> = vec![good_page.into(), broken_page.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 2_i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    save(&mut doc)
}

/// Write `text_pdf_bytes(..)` to `dir/name` and return the path.
pub fn write_text_pdf(dir: &Path, name: &str, pages: usize, lines: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text_pdf_bytes(pages, lines, 0)).expect("write fixture");
    path
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read_dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Structural-looking tier that halves any file without parsing it.
pub struct HalvingTier;

impl CompressionTier for HalvingTier {
    fn tier(&self) -> TierUsed {
        TierUsed::Structural
    }
    fn acceptance_factor(&self) -> f64 {
        0.999
    }
    fn temp_suffix(&self) -> &'static str {
        "_temp_compressed.pdf"
    }
    fn available(&self) -> bool {
        true
    }
    fn write_candidate(&self, source: &Path, target: &mut File) -> Result<(), CartaError> {
        let original = std::fs::metadata(source)?.len() as usize;
        target.write_all(&vec![b'h'; original / 2])?;
        Ok(())
    }
}

fn media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(PAGE_WIDTH_PT),
        Object::Integer(PAGE_HEIGHT_PT),
    ]
}

fn save(doc: &mut Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save fixture");
    bytes
}
