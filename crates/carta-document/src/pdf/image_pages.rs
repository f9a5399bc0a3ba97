// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image-only PDF assembly with `lopdf`: every page is a single JPEG drawn
// over the full media box. JPEG data is embedded as-is (DCTDecode) so the
// encoder's size is what lands on disk.

use std::io::Write;

use carta_core::error::CartaError;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use tracing::debug;

/// Builds a PDF whose pages each hold one JPEG image.
pub struct ImagePageDocument {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl ImagePageDocument {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append a page of `width_pt` x `height_pt` points showing `jpeg`
    /// (an RGB baseline JPEG of `pixel_width` x `pixel_height`).
    pub fn push_jpeg_page(
        &mut self,
        jpeg: Vec<u8>,
        pixel_width: u32,
        pixel_height: u32,
        width_pt: f32,
        height_pt: f32,
    ) -> Result<(), CartaError> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(CartaError::ImageError("empty page raster".into()));
        }
        if !(width_pt > 0.0 && height_pt > 0.0) {
            return Err(CartaError::PdfError(format!(
                "invalid page size {}x{} pt",
                width_pt, height_pt
            )));
        }

        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(pixel_width),
                "Height" => i64::from(pixel_height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "DCTDecode",
            },
            jpeg,
        )
        .with_compression(false);
        let image_id = self.document.add_object(image_stream);

        // Scale the unit image square up to the page.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(width_pt),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(height_pt),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content.encode().map_err(|err| {
            CartaError::PdfError(format!("failed to encode page content: {}", err))
        })?;
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, encoded));

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        self.kids.push(Object::Reference(page_id));
        Ok(())
    }

    /// Close the page tree, deflate the content streams and serialise.
    pub fn write_to<W: Write>(self, target: &mut W) -> Result<(), CartaError> {
        let Self {
            mut document,
            pages_id,
            kids,
        } = self;

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        document.compress();
        document.save_to(target).map_err(|err| {
            CartaError::PdfError(format!("failed to serialise image PDF: {}", err))
        })?;

        debug!(pages = count, "Image PDF written");
        Ok(())
    }
}

impl Default for ImagePageDocument {
    fn default() -> Self {
        Self::new()
    }
}
