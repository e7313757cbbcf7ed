//! Spooler argument assembly and job submission for CUPS and LPR.

pub mod args;
pub mod job;
pub mod pages;
pub mod probe;
pub mod runner;
pub mod settings;

pub use args::{cups_options, print_arguments, SpoolerKind};
pub use job::{print_files, ExitCode};
pub use pages::{page_list, page_list_to_page_range, page_range};
pub use probe::{ps2pdf_available, psselect_available, LocalServices, ServicePresence};
pub use runner::{ProcessRunner, RunStatus, SystemRunner};
pub use settings::{
    DuplexMode, FileDeletePolicy, Margins, PageOrder, PageSelectPolicy, PaperSource, PrintRange,
    PrintSettings, PrinterState,
};
