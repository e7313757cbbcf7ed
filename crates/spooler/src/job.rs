//! Job submission: validation, client discovery and the spawn itself.
//! 列印工作提交：檢查、用戶端尋找與實際啟動。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use psprint_paper::Orientation;

use crate::args::{print_arguments, SpoolerKind};
use crate::probe::ServicePresence;
use crate::runner::{ProcessRunner, RunStatus};
use crate::settings::{FileDeletePolicy, PageSelectPolicy, PrintSettings, PrinterState};

/// Spooler client binaries, tried in order. The CUPS-flavoured wrappers
/// come first so their extended options are available when installed.
const CLIENT_CANDIDATES: &[&str] = &["lpr-cups", "lpr.cups", "lpr"];

/// Result of a submission attempt. Failures before the client even runs
/// carry their own codes so callers can tell them apart from a client
/// exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The client ran and exited with this code; `0` is success.
    Client(i32),
    /// The client process was terminated by a signal.
    Crashed,
    /// The client could not be started.
    StartFailed,
    /// Could not copy the job to the requested output file.
    CopyFailed,
    /// The destination printer is aborted or in error.
    InvalidPrinterState,
    /// A file in the job list does not exist.
    FileNotFound,
    /// A file in the job list has an empty name, or the list is empty.
    EmptyFileName,
    /// No spooler client binary was found on the search path.
    SpoolerNotFound,
    /// A temporary file for page extraction could not be created.
    TempFileFailed,
}

impl ExitCode {
    /// Flattens to the numeric convention callers log and script
    /// against: client exit codes are non-negative, local failures are
    /// negative sentinels.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Client(code) => code,
            ExitCode::Crashed => -1,
            ExitCode::StartFailed => -2,
            ExitCode::CopyFailed => -5,
            ExitCode::InvalidPrinterState => -6,
            ExitCode::FileNotFound => -7,
            ExitCode::EmptyFileName => -8,
            ExitCode::SpoolerNotFound => -9,
            ExitCode::TempFileFailed => -10,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Client(0))
    }
}

/// Submits `file_list` to the local print system.
///
/// Validates the job, picks the client dialect from the detected
/// services, falls back to `psselect` page extraction when the spooler
/// cannot select pages itself, and finally spawns the client. A
/// print-to-file job copies instead of spawning.
/// （將檔案清單送交本機列印系統；依偵測到的服務選擇用戶端方言。）
pub fn print_files<R: ProcessRunner, S: ServicePresence>(
    runner: &R,
    services: &S,
    settings: &PrintSettings,
    file_list: &[PathBuf],
    document_orientation: Orientation,
    delete_policy: FileDeletePolicy,
    select_policy: PageSelectPolicy,
    page_range: &str,
) -> ExitCode {
    if file_list.is_empty() {
        warn!("no files in print job");
        return ExitCode::EmptyFileName;
    }
    for file in file_list {
        if file.as_os_str().is_empty() {
            warn!("empty file name in print job");
            return ExitCode::EmptyFileName;
        }
        if !file.is_file() {
            warn!(file = %file.display(), "print file not found");
            return ExitCode::FileNotFound;
        }
    }
    if matches!(
        settings.state,
        PrinterState::Aborted | PrinterState::Error
    ) {
        warn!(printer = %settings.printer_name, "printer not in a printable state");
        return ExitCode::InvalidPrinterState;
    }

    if let Some(target) = &settings.output_file {
        return copy_to_output(file_list, target, delete_policy);
    }

    let Some((client_name, client_path)) = discover_client(runner) else {
        warn!("no spooler client found");
        return ExitCode::SpoolerNotFound;
    };
    let kind = if services.cups_available() {
        SpoolerKind::Cups
    } else {
        SpoolerKind::Lpr
    };
    debug!(client = client_name, ?kind, "selected spooler client");

    // Plain LPR cannot select pages; extract them up front when a tool
    // for that is available. The temp file must outlive the client run.
    let mut select_policy = select_policy;
    let mut files: Vec<PathBuf> = file_list.to_vec();
    let mut _extracted: Option<tempfile::NamedTempFile> = None;
    if select_policy == PageSelectPolicy::SystemSelectsPages
        && kind == SpoolerKind::Lpr
        && !page_range.is_empty()
    {
        if let Some(psselect) = runner.find_executable("psselect") {
            match extract_pages(runner, &psselect, &files[0], page_range) {
                Ok(temp) => {
                    files = vec![temp.path().to_path_buf()];
                    _extracted = Some(temp);
                    select_policy = PageSelectPolicy::ApplicationSelectsPages;
                }
                Err(code) => return code,
            }
        }
    }

    let mut args = print_arguments(
        settings,
        delete_policy,
        select_policy,
        kind,
        page_range,
        client_name,
        document_orientation,
    );
    args.extend(files.iter().map(|f| f.to_string_lossy().into_owned()));

    map_status(runner.run(&client_path, &args))
}

fn discover_client<R: ProcessRunner>(runner: &R) -> Option<(&'static str, PathBuf)> {
    CLIENT_CANDIDATES
        .iter()
        .find_map(|name| runner.find_executable(name).map(|path| (*name, path)))
}

fn map_status(status: RunStatus) -> ExitCode {
    match status {
        RunStatus::Exited(code) => ExitCode::Client(code),
        RunStatus::Crashed => ExitCode::Crashed,
        RunStatus::StartFailed => ExitCode::StartFailed,
    }
}

/// Runs `psselect` to pull the requested pages out of `source` into a
/// fresh temp file.
fn extract_pages<R: ProcessRunner>(
    runner: &R,
    psselect: &Path,
    source: &Path,
    page_range: &str,
) -> Result<tempfile::NamedTempFile, ExitCode> {
    let temp = tempfile::Builder::new()
        .prefix("psprint-")
        .suffix(".ps")
        .tempfile()
        .map_err(|err| {
            warn!(error = %err, "could not create page extraction temp file");
            ExitCode::TempFileFailed
        })?;
    let args = vec![
        format!("-p{page_range}"),
        source.to_string_lossy().into_owned(),
        temp.path().to_string_lossy().into_owned(),
    ];
    match map_status(runner.run(psselect, &args)) {
        ExitCode::Client(0) => Ok(temp),
        failure => {
            warn!(?failure, "page extraction failed");
            Err(failure)
        }
    }
}

/// Print-to-file: copy the job to the target instead of spooling it.
/// Only single-file jobs can be written to one output file.
fn copy_to_output(
    file_list: &[PathBuf],
    target: &Path,
    delete_policy: FileDeletePolicy,
) -> ExitCode {
    if file_list.len() != 1 {
        warn!(count = file_list.len(), "print-to-file needs exactly one input");
        return ExitCode::CopyFailed;
    }
    if target.exists() {
        if let Err(err) = fs::remove_file(target) {
            warn!(target = %target.display(), error = %err, "could not replace output file");
            return ExitCode::CopyFailed;
        }
    }
    if let Err(err) = fs::copy(&file_list[0], target) {
        warn!(target = %target.display(), error = %err, "copy to output file failed");
        return ExitCode::CopyFailed;
    }
    if delete_policy == FileDeletePolicy::SystemDeletesFiles {
        if let Err(err) = fs::remove_file(&file_list[0]) {
            debug!(file = %file_list[0].display(), error = %err, "could not delete spooled file");
        }
    }
    ExitCode::Client(0)
}
