//! Page-selection helpers shared by both spooler dialects.

use crate::settings::{PrintRange, PrintSettings};

/// Expands the dialog's page selection to an explicit page list.
///
/// `last_page` is needed for the all-pages mode, `current_page` for the
/// current-page mode, and `selected` is passed through unaltered when
/// the user made an explicit selection.
pub fn page_list(
    settings: &PrintSettings,
    last_page: u32,
    current_page: u32,
    selected: &[u32],
) -> Vec<u32> {
    match settings.print_range {
        PrintRange::Selection => selected.to_vec(),
        PrintRange::PageRange { from, to } => (from..=to).collect(),
        PrintRange::CurrentPage => vec![current_page],
        PrintRange::AllPages => (1..=last_page).collect(),
    }
}

/// The dialog's page selection as a spooler range string.
pub fn page_range(settings: &PrintSettings, last_page: u32, selected: &[u32]) -> String {
    match settings.print_range {
        PrintRange::Selection => page_list_to_page_range(selected),
        PrintRange::PageRange { from, to } => format!("{from}-{to}"),
        _ => format!("1-{last_page}"),
    }
}

/// Compresses a sorted page list into the minimal comma-separated range
/// string: consecutive runs collapse to `start-end`, isolated pages stay
/// as individual numbers.
pub fn page_list_to_page_range(pages: &[u32]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    while i < pages.len() {
        let start = i;
        while i + 1 < pages.len() && pages[i + 1] == pages[i] + 1 {
            i += 1;
        }
        if start == i {
            parts.push(pages[i].to_string());
        } else {
            parts.push(format!("{}-{}", pages[start], pages[i]));
        }
        i += 1;
    }
    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_pages_expands_to_full_list() {
        let settings = PrintSettings::default();
        assert_eq!(
            page_list(&settings, 10, 3, &[]),
            (1..=10).collect::<Vec<_>>()
        );
    }

    #[test]
    fn current_page_is_singleton() {
        let settings = PrintSettings {
            print_range: PrintRange::CurrentPage,
            ..Default::default()
        };
        assert_eq!(page_list(&settings, 10, 5, &[]), vec![5]);
    }

    #[test]
    fn selection_passes_through_unaltered() {
        let settings = PrintSettings {
            print_range: PrintRange::Selection,
            ..Default::default()
        };
        assert_eq!(page_list(&settings, 10, 5, &[2, 4, 9]), vec![2, 4, 9]);
    }

    #[test]
    fn explicit_range_expands_inclusively() {
        let settings = PrintSettings {
            print_range: PrintRange::PageRange { from: 3, to: 6 },
            ..Default::default()
        };
        assert_eq!(page_list(&settings, 10, 5, &[]), vec![3, 4, 5, 6]);
    }

    #[test]
    fn long_run_collapses_to_dash_range() {
        assert_eq!(page_list_to_page_range(&[1, 2, 3, 4]), "1-4");
    }

    #[test]
    fn isolated_and_paired_pages() {
        assert_eq!(page_list_to_page_range(&[1, 3, 4, 7]), "1,3-4,7");
        assert_eq!(page_list_to_page_range(&[2]), "2");
        assert_eq!(page_list_to_page_range(&[3, 4]), "3-4");
    }

    #[test]
    fn mixed_runs() {
        assert_eq!(page_list_to_page_range(&[1, 2, 3, 5, 8, 9, 10, 12]), "1-3,5,8-10,12");
    }

    #[test]
    fn empty_list_is_empty_string() {
        assert_eq!(page_list_to_page_range(&[]), "");
    }

    #[test]
    fn range_string_variants() {
        let all = PrintSettings::default();
        assert_eq!(page_range(&all, 7, &[]), "1-7");

        let explicit = PrintSettings {
            print_range: PrintRange::PageRange { from: 2, to: 5 },
            ..Default::default()
        };
        assert_eq!(page_range(&explicit, 7, &[]), "2-5");

        let selection = PrintSettings {
            print_range: PrintRange::Selection,
            ..Default::default()
        };
        assert_eq!(page_range(&selection, 7, &[1, 2, 3, 6]), "1-3,6");
    }
}
