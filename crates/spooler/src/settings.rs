//! Print-job settings consumed, never owned, by the argument builder.

use std::path::PathBuf;

use psprint_paper::{Orientation, PaperKind};

/// Which pages the user asked for in the print dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintRange {
    #[default]
    AllPages,
    PageRange {
        from: u32,
        to: u32,
    },
    Selection,
    CurrentPage,
}

/// Two-sided printing mode. `Auto` leaves the decision to the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplexMode {
    #[default]
    Off,
    Auto,
    LongEdge,
    ShortEdge,
}

/// Output order of the printed sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrder {
    #[default]
    FirstPageFirst,
    LastPageFirst,
}

/// Paper input slot requested for the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSource {
    #[default]
    Auto,
    Cassette,
    Envelope,
    EnvelopeManual,
    FormSource,
    LargeCapacity,
    LargeFormat,
    Lower,
    MaxPageSource,
    Middle,
    Manual,
    OnlyOne,
    Tractor,
    SmallFormat,
    Upper,
}

impl PaperSource {
    /// CUPS media keyword for the slot; `Auto` has none.
    pub fn media_name(self) -> Option<&'static str> {
        match self {
            PaperSource::Auto => None,
            PaperSource::Cassette => Some("Cassette"),
            PaperSource::Envelope => Some("Envelope"),
            PaperSource::EnvelopeManual => Some("EnvelopeManual"),
            PaperSource::FormSource => Some("FormSource"),
            PaperSource::LargeCapacity => Some("LargeCapacity"),
            PaperSource::LargeFormat => Some("LargeFormat"),
            PaperSource::Lower => Some("Lower"),
            PaperSource::MaxPageSource => Some("MaxPageSource"),
            PaperSource::Middle => Some("Middle"),
            PaperSource::Manual => Some("Manual"),
            PaperSource::OnlyOne => Some("OnlyOne"),
            PaperSource::Tractor => Some("Tractor"),
            PaperSource::SmallFormat => Some("SmallFormat"),
            PaperSource::Upper => Some("Upper"),
        }
    }
}

/// Reported state of the destination printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrinterState {
    #[default]
    Idle,
    Active,
    Aborted,
    Error,
}

/// Margin values expressed in points (1/72").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Whether spooled files get deleted by the application or by the print
/// system. System deletion matters when the application's temp cleanup
/// would remove the file before the spooler has read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDeletePolicy {
    ApplicationDeletesFiles,
    SystemDeletesFiles,
}

/// Whether the files already contain exactly the pages the user picked,
/// or the print system must select a range out of the full document.
/// System-side selection only works with CUPS, not LPR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelectPolicy {
    ApplicationSelectsPages,
    SystemSelectsPages,
}

/// Snapshot of the print dialog, read-only for the argument builder.
#[derive(Debug, Clone)]
pub struct PrintSettings {
    pub printer_name: String,
    /// Job name shown in the queue; empty means no `-J` flag.
    pub doc_name: String,
    pub copies: u32,
    pub collate: bool,
    pub print_range: PrintRange,
    pub page_order: PageOrder,
    /// Orientation the user requested in the dialog.
    pub orientation: Orientation,
    pub paper: PaperKind,
    pub paper_source: PaperSource,
    pub duplex: DuplexMode,
    /// Explicit margins; `None` leaves the printer defaults untouched.
    pub margins: Option<Margins>,
    pub state: PrinterState,
    /// Print-to-file target; when set no spooler process is spawned.
    pub output_file: Option<PathBuf>,
    /// Arbitrary passthrough `-o` properties; an empty value emits the
    /// bare key.
    pub cups_properties: Vec<(String, String)>,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            printer_name: String::new(),
            doc_name: String::new(),
            copies: 1,
            collate: false,
            print_range: PrintRange::AllPages,
            page_order: PageOrder::FirstPageFirst,
            orientation: Orientation::Portrait,
            paper: PaperKind::A4,
            paper_source: PaperSource::Auto,
            duplex: DuplexMode::Off,
            margins: None,
            state: PrinterState::Idle,
            output_file: None,
            cups_properties: Vec::new(),
        }
    }
}
