use std::io::Write;

use psprint_document::{DscBackend, PsDocument};
use psprint_paper::{Orientation, PaperKind};

fn write_ps(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ps")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write sample");
    file
}

#[test]
fn inspect_classifies_a4_document() {
    let file = write_ps(
        "%!PS-Adobe-3.0\n\
         %%Pages: 2\n\
         %%BoundingBox: 0 0 595 842\n\
         %%Orientation: Portrait\n\
         %%Page: 1 1\n\
         %%Page: 2 2\n\
         %%EOF\n",
    );

    let mut document = PsDocument::load(&DscBackend, file.path());
    assert!(document.is_valid());
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.paper(), PaperKind::A4);
    assert_eq!(document.orientation(), Orientation::Portrait);
    for page in document.pages() {
        assert!(page.is_valid());
        assert_eq!(page.paper(), PaperKind::A4);
    }

    document.close();
    assert!(!document.is_valid());
    assert_eq!(document.page_count(), 0);
    document.close();
}

#[test]
fn inspect_accepts_scanned_a4_variant() {
    let file = write_ps(
        "%!PS-Adobe-3.0\n\
         %%Pages: 1\n\
         %%BoundingBox: 0 0 596 843\n\
         %%Page: 1 1\n",
    );

    let document = PsDocument::load(&DscBackend, file.path());
    assert_eq!(document.paper(), PaperKind::A4);
}

#[test]
fn inspect_mixed_orientation_pages() {
    let file = write_ps(
        "%!PS-Adobe-3.0\n\
         %%Pages: 2\n\
         %%BoundingBox: 0 0 612 792\n\
         %%Page: 1 1\n\
         %%Page: 2 2\n\
         %%PageBoundingBox: 0 0 1224 792\n\
         %%PageOrientation: Landscape\n",
    );

    let document = PsDocument::load(&DscBackend, file.path());
    assert_eq!(document.paper(), PaperKind::Letter);
    assert_eq!(document.pages()[0].orientation(), Orientation::Portrait);
    assert_eq!(document.pages()[1].orientation(), Orientation::Landscape);
    assert_eq!(document.pages()[1].paper(), PaperKind::Ledger);
}

#[test]
fn inspect_failure_leaves_no_dangling_state() {
    let file = write_ps("not postscript at all\n");

    let mut document = PsDocument::load(&DscBackend, file.path());
    assert!(!document.is_valid());
    assert_eq!(document.page_count(), 0);
    assert_eq!(document.size(), (0, 0));
    // Closing an invalid document must be safe.
    document.close();
    document.close();
}
