//! Trait seam over the external document-rendering library.
//! 外部文件渲染函式庫的抽象介面。

use std::path::Path;

use thiserror::Error;

use psprint_paper::Orientation;

/// Errors surfaced by a rendering-backend call.
/// 渲染後端呼叫可能回報的錯誤。
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("backend reported error status: {0}")]
    Status(String),
    #[error("page {index} unavailable: {reason}")]
    Page { index: u32, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Orientation vocabulary of the rendering library, before the reverse
/// variants are collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawOrientation {
    Portrait,
    ReversePortrait,
    Landscape,
    ReverseLandscape,
}

impl From<RawOrientation> for Orientation {
    fn from(raw: RawOrientation) -> Self {
        match raw {
            RawOrientation::Portrait | RawOrientation::ReversePortrait => Orientation::Portrait,
            RawOrientation::Landscape | RawOrientation::ReverseLandscape => Orientation::Landscape,
        }
    }
}

/// Geometry reported for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: i32,
    pub height: i32,
    pub orientation: RawOrientation,
}

/// An open document inside the rendering library. Dropping the value
/// releases the underlying handle, so release happens exactly once on
/// every exit path.
/// 渲染函式庫中已開啟的文件；值被丟棄時即釋放底層控制代碼。
pub trait RenderedDocument {
    fn page_count(&self) -> i32;

    /// Document-level size in points. Non-positive values mean the
    /// backend could not determine the size.
    fn size(&self) -> (i32, i32);

    fn orientation(&self) -> RawOrientation;

    fn page(&self, index: u32) -> Result<PageGeometry, RenderError>;
}

/// Abstraction over document-rendering libraries.
/// 文件渲染函式庫的抽象層。
pub trait RenderBackend {
    type Document: RenderedDocument;

    fn open(&self, path: &Path) -> Result<Self::Document, RenderError>;
}
