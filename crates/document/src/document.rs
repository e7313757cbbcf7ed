//! Loaded-document model: page sequence, geometry defaults, validity.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use psprint_paper::{Orientation, PaperKind};

use crate::backend::{RenderBackend, RenderedDocument};

/// One page of a loaded document. Immutable once constructed; valid only
/// when built from real dimensions. Page validity is independent of the
/// owning document's validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    width: u32,
    height: u32,
    orientation: Orientation,
    valid: bool,
}

impl Page {
    /// An invalid placeholder with zero geometry.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            orientation: Orientation::Portrait,
            valid: false,
        }
    }

    pub fn new(width: u32, height: u32, orientation: Orientation) -> Self {
        Self {
            width,
            height,
            orientation,
            valid: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Classification of this page's dimensions against the standard
    /// paper sizes.
    pub fn paper(&self) -> PaperKind {
        PaperKind::classify(self.width, self.height)
    }
}

/// A PostScript document inspected through a [`RenderBackend`].
///
/// The backend handle is owned exclusively by this value for its whole
/// lifetime (load, use, close) and is never aliased. The handle lives in
/// an `Option`, so [`PsDocument::close`] can be called any number of
/// times and the load-failure path holds no handle at all.
#[derive(Debug)]
pub struct PsDocument<D> {
    handle: Option<D>,
    path: PathBuf,
    pages: Vec<Page>,
    paper: PaperKind,
    size: (u32, u32),
    orientation: Orientation,
    valid: bool,
}

impl<D: RenderedDocument> PsDocument<D> {
    fn empty(path: &Path) -> Self {
        Self {
            handle: None,
            path: path.to_path_buf(),
            pages: Vec::new(),
            paper: PaperKind::Custom,
            size: (0, 0),
            orientation: Orientation::Portrait,
            valid: false,
        }
    }

    /// Loads `path` through `backend`.
    ///
    /// A failed open yields an invalid document with no pages; the
    /// diagnostic is logged rather than returned so callers can treat
    /// "not loadable" uniformly. A page whose geometry cannot be read is
    /// appended as an invalid [`Page`] instead of inheriting stale
    /// dimensions from its predecessor.
    pub fn load<B>(backend: &B, path: impl AsRef<Path>) -> Self
    where
        B: RenderBackend<Document = D>,
    {
        let path = path.as_ref();
        let handle = match backend.open(path) {
            Ok(handle) => handle,
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to open PostScript document");
                return Self::empty(path);
            }
        };

        let mut document = Self::empty(path);

        let reported = handle.page_count();
        let count = if reported > 0 {
            debug!(pages = reported, "page count");
            reported as u32
        } else {
            warn!("unable to determine page count");
            0
        };

        let (width, height) = handle.size();
        if width > 0 && height > 0 {
            document.size = (width as u32, height as u32);
            document.paper = PaperKind::classify(width as u32, height as u32);
            debug!(width, height, paper = %document.paper, "document size");
        } else {
            warn!(width, height, "unable to determine document size");
        }
        document.orientation = handle.orientation().into();

        for index in 0..count {
            match handle.page(index) {
                Ok(geometry) => document.pages.push(Page::new(
                    geometry.width.max(0) as u32,
                    geometry.height.max(0) as u32,
                    geometry.orientation.into(),
                )),
                Err(err) => {
                    warn!(page = index, %err, "failed to read page geometry");
                    document.pages.push(Page::empty());
                }
            }
        }
        debug!(loaded = document.pages.len(), "loaded pages");

        document.handle = Some(handle);
        document.valid = true;
        document
    }

    /// Releases the backend handle and resets the document to its empty
    /// state. Safe to call any number of times.
    pub fn close(&mut self) {
        self.handle = None;
        self.path.clear();
        self.pages.clear();
        self.paper = PaperKind::Custom;
        self.size = (0, 0);
        self.orientation = Orientation::Portrait;
        self.valid = false;
    }

    /// True when the document loaded successfully and still holds its
    /// backend handle.
    pub fn is_valid(&self) -> bool {
        self.valid && self.handle.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Classification of the document-level size.
    pub fn paper(&self) -> PaperKind {
        self.paper
    }

    /// Document-level size in points; `(0, 0)` when unknown.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}
