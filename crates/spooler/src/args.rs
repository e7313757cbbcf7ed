//! Ordered argument assembly for the CUPS and LPR client dialects.
//! CUPS 與 LPR 用戶端方言的參數組裝。

use psprint_paper::{Orientation, PaperKind};

use crate::settings::{
    DuplexMode, FileDeletePolicy, PageOrder, PageSelectPolicy, PrintRange, PrintSettings,
};

/// Argument dialect understood by the discovered spooler client. The
/// common prefix is shared; only the extended `-o` suffix and the page
/// selection flags differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpoolerKind {
    Cups,
    Lpr,
}

/// Assembles the full argument vector for one job, file list excluded.
///
/// Real-world clients are sensitive to flag grouping, so the order is
/// fixed: destination, copies, job name, delete flag, page selection,
/// then the extended options for the CUPS dialect only.
pub fn print_arguments(
    settings: &PrintSettings,
    delete_policy: FileDeletePolicy,
    select_policy: PageSelectPolicy,
    kind: SpoolerKind,
    page_range: &str,
    client: &str,
    document_orientation: Orientation,
) -> Vec<String> {
    let mut args = Vec::new();
    args.extend(destination(settings, client));
    args.extend(copies(settings, client));
    args.extend(jobname(settings, client));
    args.extend(delete_file(delete_policy, client));
    args.extend(pages(settings, select_policy, page_range, kind));
    if kind == SpoolerKind::Cups {
        args.extend(cups_options(settings, document_orientation));
    }
    args
}

/// Destination queue flag: `-P` for the lpr family, `-d` for lp.
pub fn destination(settings: &PrintSettings, client: &str) -> Vec<String> {
    if client.starts_with("lpr") {
        vec!["-P".to_string(), settings.printer_name.clone()]
    } else if client.starts_with("lp") {
        vec!["-d".to_string(), settings.printer_name.clone()]
    } else {
        Vec::new()
    }
}

pub fn copies(settings: &PrintSettings, client: &str) -> Vec<String> {
    let count = settings.copies.max(1);
    if client.starts_with("lpr") {
        vec![format!("-#{count}")]
    } else if client.starts_with("lp") {
        vec!["-n".to_string(), count.to_string()]
    } else {
        Vec::new()
    }
}

pub fn jobname(settings: &PrintSettings, client: &str) -> Vec<String> {
    if settings.doc_name.is_empty() {
        return Vec::new();
    }
    if client.starts_with("lpr") {
        vec!["-J".to_string(), settings.doc_name.clone()]
    } else if client.starts_with("lp") {
        vec!["-t".to_string(), settings.doc_name.clone()]
    } else {
        Vec::new()
    }
}

/// `-r` asks the lpr family to delete the file once spooled.
pub fn delete_file(delete_policy: FileDeletePolicy, client: &str) -> Vec<String> {
    if delete_policy == FileDeletePolicy::SystemDeletesFiles && client.starts_with("lpr") {
        vec!["-r".to_string()]
    } else {
        Vec::new()
    }
}

/// Page-selection flags. Only the CUPS dialect has a native range
/// syntax; for LPR the caller falls back to an application-side page
/// list, so nothing is emitted here.
pub fn pages(
    settings: &PrintSettings,
    select_policy: PageSelectPolicy,
    page_range: &str,
    kind: SpoolerKind,
) -> Vec<String> {
    if select_policy == PageSelectPolicy::SystemSelectsPages && kind == SpoolerKind::Cups {
        match settings.print_range {
            PrintRange::Selection if !page_range.is_empty() => {
                return vec!["-o".to_string(), format!("page-ranges={page_range}")];
            }
            PrintRange::PageRange { from, to } => {
                return vec!["-o".to_string(), format!("page-ranges={from}-{to}")];
            }
            _ => {}
        }
    }
    Vec::new()
}

/// Extended options for the CUPS dialect, in their fixed order: media,
/// orientation, duplex, output order, collation, margins, passthrough
/// properties.
pub fn cups_options(settings: &PrintSettings, document_orientation: Orientation) -> Vec<String> {
    let mut options = Vec::new();
    options.extend(option_media(settings));
    options.extend(option_orientation(settings, document_orientation));
    options.extend(option_double_sided(settings));
    options.extend(option_page_order(settings));
    options.extend(option_collate(settings));
    options.extend(option_page_margins(settings));
    options.extend(option_cups_properties(settings));
    options
}

fn media_page_size(settings: &PrintSettings) -> Option<&'static str> {
    match settings.paper {
        PaperKind::Custom => None,
        kind => Some(kind.media_name()),
    }
}

pub fn option_media(settings: &PrintSettings) -> Vec<String> {
    match (media_page_size(settings), settings.paper_source.media_name()) {
        (Some(size), Some(source)) => vec!["-o".to_string(), format!("media={size},{source}")],
        (Some(size), None) => vec!["-o".to_string(), format!("media={size}")],
        (None, Some(source)) => vec!["-o".to_string(), format!("media={source}")],
        (None, None) => Vec::new(),
    }
}

/// The CUPS orientation option rotates relative to the document's own
/// orientation, so a document that is already landscape must be sent as
/// "portrait" to avoid a double rotation.
pub fn option_orientation(
    settings: &PrintSettings,
    document_orientation: Orientation,
) -> Vec<String> {
    let keyword = if settings.orientation == document_orientation {
        "portrait"
    } else {
        "landscape"
    };
    vec!["-o".to_string(), keyword.to_string()]
}

pub fn option_double_sided(settings: &PrintSettings) -> Vec<String> {
    match settings.duplex {
        DuplexMode::Off => vec!["-o".to_string(), "sides=one-sided".to_string()],
        // Printer default.
        DuplexMode::Auto => Vec::new(),
        DuplexMode::LongEdge => vec!["-o".to_string(), "sides=two-sided-long-edge".to_string()],
        DuplexMode::ShortEdge => vec!["-o".to_string(), "sides=two-sided-short-edge".to_string()],
    }
}

pub fn option_page_order(settings: &PrintSettings) -> Vec<String> {
    match settings.page_order {
        PageOrder::FirstPageFirst => vec!["-o".to_string(), "outputorder=normal".to_string()],
        PageOrder::LastPageFirst => vec!["-o".to_string(), "outputorder=reverse".to_string()],
    }
}

pub fn option_collate(settings: &PrintSettings) -> Vec<String> {
    if settings.collate {
        vec!["-o".to_string(), "Collate=True".to_string()]
    } else {
        vec!["-o".to_string(), "Collate=False".to_string()]
    }
}

pub fn option_page_margins(settings: &PrintSettings) -> Vec<String> {
    match settings.margins {
        None => Vec::new(),
        Some(margins) => vec![
            "-o".to_string(),
            format!("page-left={}", margins.left),
            "-o".to_string(),
            format!("page-top={}", margins.top),
            "-o".to_string(),
            format!("page-right={}", margins.right),
            "-o".to_string(),
            format!("page-bottom={}", margins.bottom),
        ],
    }
}

pub fn option_cups_properties(settings: &PrintSettings) -> Vec<String> {
    let mut options = Vec::new();
    for (key, value) in &settings.cups_properties {
        options.push("-o".to_string());
        if value.is_empty() {
            options.push(key.clone());
        } else {
            options.push(format!("{key}={value}"));
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Margins, PaperSource};

    #[test]
    fn destination_flag_per_client_family() {
        let settings = PrintSettings {
            printer_name: "office".to_string(),
            ..Default::default()
        };
        assert_eq!(destination(&settings, "lpr-cups"), vec!["-P", "office"]);
        assert_eq!(destination(&settings, "lp"), vec!["-d", "office"]);
    }

    #[test]
    fn copies_flag_per_client_family() {
        let settings = PrintSettings {
            copies: 3,
            ..Default::default()
        };
        assert_eq!(copies(&settings, "lpr"), vec!["-#3"]);
        assert_eq!(copies(&settings, "lp"), vec!["-n", "3"]);
    }

    #[test]
    fn empty_job_name_emits_nothing() {
        let settings = PrintSettings::default();
        assert!(jobname(&settings, "lpr").is_empty());
    }

    #[test]
    fn delete_flag_only_for_system_policy() {
        assert_eq!(
            delete_file(FileDeletePolicy::SystemDeletesFiles, "lpr-cups"),
            vec!["-r"]
        );
        assert!(delete_file(FileDeletePolicy::ApplicationDeletesFiles, "lpr-cups").is_empty());
    }

    #[test]
    fn page_flags_only_for_cups() {
        let settings = PrintSettings {
            print_range: PrintRange::PageRange { from: 2, to: 4 },
            ..Default::default()
        };
        assert_eq!(
            pages(
                &settings,
                PageSelectPolicy::SystemSelectsPages,
                "",
                SpoolerKind::Cups
            ),
            vec!["-o", "page-ranges=2-4"]
        );
        assert!(pages(
            &settings,
            PageSelectPolicy::SystemSelectsPages,
            "",
            SpoolerKind::Lpr
        )
        .is_empty());
        assert!(pages(
            &settings,
            PageSelectPolicy::ApplicationSelectsPages,
            "",
            SpoolerKind::Cups
        )
        .is_empty());
    }

    #[test]
    fn selection_uses_the_given_range_string() {
        let settings = PrintSettings {
            print_range: PrintRange::Selection,
            ..Default::default()
        };
        assert_eq!(
            pages(
                &settings,
                PageSelectPolicy::SystemSelectsPages,
                "1,3-4,7",
                SpoolerKind::Cups
            ),
            vec!["-o", "page-ranges=1,3-4,7"]
        );
    }

    #[test]
    fn media_combines_size_and_source() {
        let settings = PrintSettings {
            paper_source: PaperSource::Upper,
            ..Default::default()
        };
        assert_eq!(option_media(&settings), vec!["-o", "media=A4,Upper"]);

        let size_only = PrintSettings::default();
        assert_eq!(option_media(&size_only), vec!["-o", "media=A4"]);

        let source_only = PrintSettings {
            paper: PaperKind::Custom,
            paper_source: PaperSource::Manual,
            ..Default::default()
        };
        assert_eq!(option_media(&source_only), vec!["-o", "media=Manual"]);

        let neither = PrintSettings {
            paper: PaperKind::Custom,
            ..Default::default()
        };
        assert!(option_media(&neither).is_empty());
    }

    #[test]
    fn orientation_is_relative_to_the_document() {
        let settings = PrintSettings::default();
        // Requested portrait, document portrait: no extra rotation.
        assert_eq!(
            option_orientation(&settings, Orientation::Portrait),
            vec!["-o", "portrait"]
        );
        // Requested portrait, document landscape: rotate.
        assert_eq!(
            option_orientation(&settings, Orientation::Landscape),
            vec!["-o", "landscape"]
        );
    }

    #[test]
    fn duplex_auto_leaves_printer_default() {
        let settings = PrintSettings {
            duplex: DuplexMode::Auto,
            ..Default::default()
        };
        assert!(option_double_sided(&settings).is_empty());

        let long_edge = PrintSettings {
            duplex: DuplexMode::LongEdge,
            ..Default::default()
        };
        assert_eq!(
            option_double_sided(&long_edge),
            vec!["-o", "sides=two-sided-long-edge"]
        );
    }

    #[test]
    fn margins_emit_four_properties() {
        let settings = PrintSettings {
            margins: Some(Margins {
                left: 10.0,
                top: 15.0,
                right: 20.0,
                bottom: 25.0,
            }),
            ..Default::default()
        };
        assert_eq!(
            option_page_margins(&settings),
            vec![
                "-o",
                "page-left=10",
                "-o",
                "page-top=15",
                "-o",
                "page-right=20",
                "-o",
                "page-bottom=25"
            ]
        );
        assert!(option_page_margins(&PrintSettings::default()).is_empty());
    }

    #[test]
    fn passthrough_properties_support_bare_keys() {
        let settings = PrintSettings {
            cups_properties: vec![
                ("fit-to-page".to_string(), String::new()),
                ("number-up".to_string(), "2".to_string()),
            ],
            ..Default::default()
        };
        assert_eq!(
            option_cups_properties(&settings),
            vec!["-o", "fit-to-page", "-o", "number-up=2"]
        );
    }

    #[test]
    fn lpr_dialect_gets_no_extended_options() {
        let settings = PrintSettings {
            printer_name: "office".to_string(),
            ..Default::default()
        };
        let args = print_arguments(
            &settings,
            FileDeletePolicy::ApplicationDeletesFiles,
            PageSelectPolicy::ApplicationSelectsPages,
            SpoolerKind::Lpr,
            "",
            "lpr",
            Orientation::Portrait,
        );
        assert_eq!(args, vec!["-P", "office", "-#1"]);
    }
}
