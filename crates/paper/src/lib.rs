//! Paper-size and orientation vocabulary shared by the document
//! inspector and the spooler argument builder.

use std::fmt;

/// Standard paper sizes recognised by the spooler dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperKind {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    A9,
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    C5,
    Comm10,
    Dl,
    Executive,
    Folio,
    Ledger,
    Legal,
    Letter,
    Tabloid,
    Custom,
}

/// Exact point dimensions for each named size, portrait order.
/// A4 appears twice because off-by-one scans (596x843) are accepted
/// alongside the nominal pair; matching is integer equality with no
/// tolerance band.
const PAPER_TABLE: &[(u32, u32, PaperKind)] = &[
    (2384, 3370, PaperKind::A0),
    (1684, 2384, PaperKind::A1),
    (1191, 1684, PaperKind::A2),
    (842, 1191, PaperKind::A3),
    (595, 842, PaperKind::A4),
    (596, 843, PaperKind::A4),
    (420, 595, PaperKind::A5),
    (298, 420, PaperKind::A6),
    (210, 298, PaperKind::A7),
    (147, 210, PaperKind::A8),
    (105, 147, PaperKind::A9),
    (283, 4008, PaperKind::B0),
    (2004, 2835, PaperKind::B1),
    (1417, 2004, PaperKind::B2),
    (1001, 1417, PaperKind::B3),
    (709, 1001, PaperKind::B4),
    (499, 709, PaperKind::B5),
    (354, 499, PaperKind::B6),
    (249, 254, PaperKind::B7),
    (176, 249, PaperKind::B8),
    (125, 176, PaperKind::B9),
    (88, 125, PaperKind::B10),
    (459, 649, PaperKind::C5),
    (297, 684, PaperKind::Comm10),
    (312, 624, PaperKind::Dl),
    (522, 756, PaperKind::Executive),
    (595, 935, PaperKind::Folio),
    (1224, 792, PaperKind::Ledger),
    (612, 1008, PaperKind::Legal),
    (612, 792, PaperKind::Letter),
    (792, 1224, PaperKind::Tabloid),
];

impl PaperKind {
    /// Classifies exact point dimensions against the standard sizes.
    /// Anything not in the table is [`PaperKind::Custom`].
    pub fn classify(width: u32, height: u32) -> Self {
        PAPER_TABLE
            .iter()
            .find(|(w, h, _)| *w == width && *h == height)
            .map(|(_, _, kind)| *kind)
            .unwrap_or(PaperKind::Custom)
    }

    /// Media name understood by the spooler clients.
    pub fn media_name(self) -> &'static str {
        match self {
            PaperKind::A0 => "A0",
            PaperKind::A1 => "A1",
            PaperKind::A2 => "A2",
            PaperKind::A3 => "A3",
            PaperKind::A4 => "A4",
            PaperKind::A5 => "A5",
            PaperKind::A6 => "A6",
            PaperKind::A7 => "A7",
            PaperKind::A8 => "A8",
            PaperKind::A9 => "A9",
            PaperKind::B0 => "B0",
            PaperKind::B1 => "B1",
            PaperKind::B2 => "B2",
            PaperKind::B3 => "B3",
            PaperKind::B4 => "B4",
            PaperKind::B5 => "B5",
            PaperKind::B6 => "B6",
            PaperKind::B7 => "B7",
            PaperKind::B8 => "B8",
            PaperKind::B9 => "B9",
            PaperKind::B10 => "B10",
            PaperKind::C5 => "C5",
            PaperKind::Comm10 => "Comm10",
            PaperKind::Dl => "DL",
            PaperKind::Executive => "Executive",
            PaperKind::Folio => "Folio",
            PaperKind::Ledger => "Ledger",
            PaperKind::Legal => "Legal",
            PaperKind::Letter => "Letter",
            PaperKind::Tabloid => "Tabloid",
            PaperKind::Custom => "Custom",
        }
    }
}

impl fmt::Display for PaperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_name())
    }
}

/// Page orientation after the backend's reverse variants have been
/// collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn media_name(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_nominal_a4() {
        assert_eq!(PaperKind::classify(595, 842), PaperKind::A4);
    }

    #[test]
    fn classify_scanned_a4_variant() {
        assert_eq!(PaperKind::classify(596, 843), PaperKind::A4);
    }

    #[test]
    fn classify_letter_and_tabloid() {
        assert_eq!(PaperKind::classify(612, 792), PaperKind::Letter);
        assert_eq!(PaperKind::classify(792, 1224), PaperKind::Tabloid);
    }

    #[test]
    fn unmatched_dimensions_are_custom() {
        assert_eq!(PaperKind::classify(1, 1), PaperKind::Custom);
        assert_eq!(PaperKind::classify(0, 0), PaperKind::Custom);
    }

    #[test]
    fn no_tolerance_band() {
        // One point off the nominal pair (other than the listed scan
        // variant) must not classify as A4.
        assert_eq!(PaperKind::classify(594, 842), PaperKind::Custom);
        assert_eq!(PaperKind::classify(595, 843), PaperKind::Custom);
    }

    #[test]
    fn media_names() {
        assert_eq!(PaperKind::Comm10.media_name(), "Comm10");
        assert_eq!(PaperKind::Dl.media_name(), "DL");
        assert_eq!(PaperKind::Custom.media_name(), "Custom");
        assert_eq!(Orientation::Landscape.media_name(), "Landscape");
    }
}
