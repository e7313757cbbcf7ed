//! PostScript document inspection over an abstract rendering backend.

pub mod backend;
pub mod document;
pub mod dsc;

pub use backend::{PageGeometry, RawOrientation, RenderBackend, RenderError, RenderedDocument};
pub use document::{Page, PsDocument};
pub use dsc::DscBackend;
