//! Backend that answers geometry queries from a file's DSC header.
//!
//! The Document Structuring Convention comments (`%%Pages`,
//! `%%BoundingBox`, `%%Orientation` and their per-page variants) carry
//! everything the inspector asks for, so this backend needs no native
//! rendering library. A libspectre-style binding can replace it behind
//! the same [`RenderBackend`] trait.

use std::fs;
use std::path::Path;

use crate::backend::{PageGeometry, RawOrientation, RenderBackend, RenderError, RenderedDocument};

#[derive(Debug, Default, Clone, Copy)]
pub struct DscBackend;

#[derive(Debug)]
pub struct DscDocument {
    page_count: i32,
    size: (i32, i32),
    orientation: RawOrientation,
    pages: Vec<PageGeometry>,
}

impl RenderBackend for DscBackend {
    type Document = DscDocument;

    fn open(&self, path: &Path) -> Result<DscDocument, RenderError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        if !text.starts_with("%!PS") {
            return Err(RenderError::Open(format!(
                "{} does not start with a PostScript header",
                path.display()
            )));
        }
        Ok(parse(&text))
    }
}

impl RenderedDocument for DscDocument {
    fn page_count(&self) -> i32 {
        self.page_count
    }

    fn size(&self) -> (i32, i32) {
        self.size
    }

    fn orientation(&self) -> RawOrientation {
        self.orientation
    }

    fn page(&self, index: u32) -> Result<PageGeometry, RenderError> {
        if let Some(geometry) = self.pages.get(index as usize) {
            return Ok(*geometry);
        }
        // %%Pages can announce more pages than carry their own setup
        // section; those inherit the document-level geometry.
        if (index as i64) < i64::from(self.page_count) {
            return Ok(PageGeometry {
                width: self.size.0,
                height: self.size.1,
                orientation: self.orientation,
            });
        }
        Err(RenderError::Page {
            index,
            reason: "page index beyond document".to_string(),
        })
    }
}

fn parse(text: &str) -> DscDocument {
    let mut page_count = 0;
    let mut size = (0, 0);
    let mut orientation = RawOrientation::Portrait;
    let mut pages: Vec<PageGeometry> = Vec::new();
    let mut in_pages = false;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("%%Pages:") {
            // "(atend)" placeholders fail to parse and are skipped; the
            // trailer's numeric repeat then wins.
            if let Some(count) = parse_int(rest) {
                page_count = count;
            }
        } else if let Some(rest) = line.strip_prefix("%%BoundingBox:") {
            if !in_pages {
                if let Some(bbox) = parse_bounding_box(rest) {
                    size = bbox;
                }
            }
        } else if let Some(rest) = line.strip_prefix("%%Orientation:") {
            if !in_pages {
                if let Some(parsed) = parse_orientation(rest) {
                    orientation = parsed;
                }
            }
        } else if line.starts_with("%%Page:") {
            in_pages = true;
            pages.push(PageGeometry {
                width: size.0,
                height: size.1,
                orientation,
            });
        } else if let Some(rest) = line.strip_prefix("%%PageBoundingBox:") {
            if in_pages {
                if let (Some(bbox), Some(page)) = (parse_bounding_box(rest), pages.last_mut()) {
                    page.width = bbox.0;
                    page.height = bbox.1;
                }
            }
        } else if let Some(rest) = line.strip_prefix("%%PageOrientation:") {
            if in_pages {
                if let (Some(parsed), Some(page)) = (parse_orientation(rest), pages.last_mut()) {
                    page.orientation = parsed;
                }
            }
        }
    }

    if page_count <= 0 {
        page_count = pages.len() as i32;
    }

    DscDocument {
        page_count,
        size,
        orientation,
        pages,
    }
}

fn parse_int(rest: &str) -> Option<i32> {
    rest.trim().parse().ok()
}

fn parse_bounding_box(rest: &str) -> Option<(i32, i32)> {
    let mut values = rest.split_whitespace().map(str::parse::<i32>);
    let llx = values.next()?.ok()?;
    let lly = values.next()?.ok()?;
    let urx = values.next()?.ok()?;
    let ury = values.next()?.ok()?;
    Some((urx - llx, ury - lly))
}

fn parse_orientation(rest: &str) -> Option<RawOrientation> {
    match rest.trim() {
        "Portrait" => Some(RawOrientation::Portrait),
        "Landscape" => Some(RawOrientation::Landscape),
        _ => None,
    }
}
