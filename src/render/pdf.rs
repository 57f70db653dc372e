//! lopdf-backed rendering.
//!
//! Overlays and restored text are appended to each page's content stream:
//! the original page content is left untouched and the new operations paint
//! on top of it. Instruction coordinates use a top-left origin (the space
//! word extractors report in); PDF user space has a bottom-left origin, so
//! every y coordinate is flipped against the page's MediaBox height.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use tracing::debug;

use crate::error::{ShroudError, ShroudResult};
use crate::redaction::{DrawInstruction, OverlayInstruction};
use crate::render::RenderBackend;

/// US Letter height, assumed when a page carries no MediaBox of its own.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Resource name the restored-text font is registered under.
const FONT_KEY: &str = "FSh1";

/// Inset from the box edge to the text baseline, in page units.
const TEXT_INSET: f32 = 2.0;

/// A loaded PDF document accepting overlay and text instructions.
pub struct PdfBackend {
    doc: Document,
    page_ids: Vec<ObjectId>,
    font_id: Option<ObjectId>,
}

impl PdfBackend {
    pub fn open(path: &Path) -> ShroudResult<Self> {
        let doc = Document::load(path).map_err(|e| ShroudError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Wraps an already loaded document. Page order follows the document's
    /// page tree, so instruction page `n` is the document's `n + 1`-th page.
    pub fn from_document(doc: Document) -> Self {
        let page_ids = doc.get_pages().into_values().collect();
        Self {
            doc,
            page_ids,
            font_id: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn save(&mut self, path: &Path) -> ShroudResult<()> {
        self.doc.save(path).map_err(|e| ShroudError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?;
        Ok(())
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    fn page_id(&self, page: u32) -> ShroudResult<ObjectId> {
        self.page_ids
            .get(page as usize)
            .copied()
            .ok_or_else(|| ShroudError::InvalidInput {
                parameter: "page".to_string(),
                reason: format!(
                    "page {} out of range, document has {} pages",
                    page,
                    self.page_ids.len()
                ),
            })
    }

    /// Height of the page's MediaBox, for top-left to bottom-left flips.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        self.doc
            .get_object(page_id)
            .ok()
            .and_then(|obj| obj.as_dict().ok())
            .and_then(|dict| dict.get(b"MediaBox").ok())
            .and_then(|media_box| media_box.as_array().ok())
            .and_then(|corners| corners.get(3))
            .and_then(|top| match top {
                Object::Integer(i) => Some(*i as f32),
                Object::Real(r) => Some(*r),
                _ => None,
            })
            .unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    /// Registers the Helvetica font on a page's resources, creating the
    /// shared font object on first use.
    fn ensure_font(&mut self, page_id: ObjectId) -> ShroudResult<()> {
        let font_id = match self.font_id {
            Some(id) => id,
            None => {
                let id = self.doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => "Helvetica",
                });
                self.font_id = Some(id);
                id
            }
        };

        let resources = self.doc.get_or_create_resources(page_id)?.as_dict_mut()?;
        if !resources.has(b"Font") {
            resources.set("Font", Dictionary::new());
        }
        resources
            .get_mut(b"Font")?
            .as_dict_mut()?
            .set(FONT_KEY, Object::Reference(font_id));
        Ok(())
    }

    /// Appends operations to a page's content stream, after the existing
    /// content so the additions paint on top.
    fn append_operations(
        &mut self,
        page_id: ObjectId,
        operations: Vec<Operation>,
    ) -> ShroudResult<()> {
        let encoded = Content { operations }.encode()?;
        let mut content = self.doc.get_page_content(page_id)?;
        content.push(b'\n');
        content.extend_from_slice(&encoded);
        self.doc.change_page_content(page_id, content)?;
        Ok(())
    }

    fn overlay_operations(bbox: &crate::domain::Rect, page_height: f32) -> Vec<Operation> {
        vec![
            Operation::new("q", vec![]),
            Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
            Operation::new(
                "re",
                vec![
                    Object::Real(bbox.x0),
                    Object::Real(page_height - bbox.y1),
                    Object::Real(bbox.width()),
                    Object::Real(bbox.height()),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]
    }

    fn text_operations(draw: &DrawInstruction, page_height: f32) -> Vec<Operation> {
        vec![
            // Clear the overlay back to white before drawing, or the text
            // would land invisibly on the black fill.
            Operation::new("q", vec![]),
            Operation::new("rg", vec![1.into(), 1.into(), 1.into()]),
            Operation::new(
                "re",
                vec![
                    Object::Real(draw.bbox.x0),
                    Object::Real(page_height - draw.bbox.y1),
                    Object::Real(draw.bbox.width()),
                    Object::Real(draw.bbox.height()),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![FONT_KEY.into(), Object::Real(draw.font_size)],
            ),
            Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
            Operation::new(
                "Td",
                vec![
                    Object::Real(draw.bbox.x0 + TEXT_INSET),
                    Object::Real(page_height - draw.bbox.y1 + TEXT_INSET),
                ],
            ),
            Operation::new("Tj", vec![Object::string_literal(draw.text.as_str())]),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ]
    }
}

impl RenderBackend for PdfBackend {
    fn paint_overlays(&mut self, overlays: &[OverlayInstruction]) -> ShroudResult<()> {
        let mut by_page: BTreeMap<u32, Vec<Operation>> = BTreeMap::new();
        for overlay in overlays {
            let page_id = self.page_id(overlay.page)?;
            let height = self.page_height(page_id);
            by_page
                .entry(overlay.page)
                .or_default()
                .extend(Self::overlay_operations(&overlay.bbox, height));
        }

        for (page, operations) in by_page {
            let page_id = self.page_id(page)?;
            debug!(page, ops = operations.len(), "painting overlays");
            self.append_operations(page_id, operations)?;
        }
        Ok(())
    }

    fn draw_text(&mut self, draws: &[DrawInstruction]) -> ShroudResult<()> {
        let mut by_page: BTreeMap<u32, Vec<Operation>> = BTreeMap::new();
        for draw in draws {
            let page_id = self.page_id(draw.page)?;
            let height = self.page_height(page_id);
            by_page
                .entry(draw.page)
                .or_default()
                .extend(Self::text_operations(draw, height));
        }

        for (page, operations) in by_page {
            let page_id = self.page_id(page)?;
            self.ensure_font(page_id)?;
            debug!(page, ops = operations.len(), "drawing restored text");
            self.append_operations(page_id, operations)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}
