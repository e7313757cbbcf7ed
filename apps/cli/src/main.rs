use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use psprint_document::{DscBackend, PsDocument};
use psprint_paper::Orientation;
use psprint_spooler::{
    print_files, ps2pdf_available, psselect_available, DuplexMode, ExitCode, FileDeletePolicy,
    LocalServices, Margins, PageOrder, PageSelectPolicy, PrintRange, PrintSettings, ProcessRunner,
    ServicePresence, SystemRunner,
};

#[derive(Parser)]
#[command(
    name = "psprint-cli",
    about = "Inspect PostScript documents and submit them to CUPS or LPR",
    author,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 檢視 PostScript 文件的頁面與紙張資訊。 / Inspect page and paper information of a PostScript document.
    Inspect(InspectArgs),
    /// 將檔案送交本機列印系統。 / Submit files to the local print system.
    Print(PrintArgs),
    /// 偵測本機列印環境的能力。 / Probe the capabilities of the local print environment.
    Probe,
}

#[derive(Args)]
struct InspectArgs {
    /// 要檢視的 PostScript 檔案。 / PostScript file to inspect.
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

#[derive(Args)]
struct PrintArgs {
    /// 要列印的檔案。 / Files to print.
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// 目的印表機佇列名稱。 / Destination printer queue.
    #[arg(long, short = 'P', default_value = "")]
    printer: String,

    /// 佇列中顯示的工作名稱。 / Job name shown in the queue.
    #[arg(long, default_value = "")]
    job_name: String,

    /// 列印份數。 / Number of copies.
    #[arg(long, default_value_t = 1)]
    copies: u32,

    /// 自動分頁。 / Collate the copies.
    #[arg(long)]
    collate: bool,

    /// 橫向列印。 / Print in landscape orientation.
    #[arg(long)]
    landscape: bool,

    /// 雙面列印模式。 / Two-sided printing mode.
    #[arg(long, value_enum, default_value_t = DuplexChoice::Off)]
    duplex: DuplexChoice,

    /// 反轉輸出順序（最後一頁先出）。 / Reverse the output order (last page first).
    #[arg(long)]
    reverse: bool,

    /// 頁面選擇：範圍 "2-5" 或清單 "1,3,7"。 / Page selection: a range "2-5" or a list "1,3,7".
    #[arg(long, value_name = "PAGES")]
    pages: Option<String>,

    /// 頁面邊界，格式 left,top,right,bottom（點）。 / Page margins as left,top,right,bottom in points.
    #[arg(long, value_name = "L,T,R,B")]
    margins: Option<String>,

    /// 列印到檔案而非送交佇列。 / Print to a file instead of spooling.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// 送交後由列印系統刪除檔案。 / Let the print system delete the files after spooling.
    #[arg(long)]
    delete: bool,

    /// 額外的 CUPS 屬性，key 或 key=value。 / Extra CUPS properties, key or key=value.
    #[arg(long = "option", short = 'o', value_name = "KEY[=VALUE]")]
    options: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DuplexChoice {
    Off,
    Auto,
    #[value(name = "long-edge", alias = "long")]
    LongEdge,
    #[value(name = "short-edge", alias = "short")]
    ShortEdge,
}

impl From<DuplexChoice> for DuplexMode {
    fn from(choice: DuplexChoice) -> Self {
        match choice {
            DuplexChoice::Off => DuplexMode::Off,
            DuplexChoice::Auto => DuplexMode::Auto,
            DuplexChoice::LongEdge => DuplexMode::LongEdge,
            DuplexChoice::ShortEdge => DuplexMode::ShortEdge,
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    match Cli::parse().command {
        Commands::Inspect(args) => execute_inspect(args),
        Commands::Print(args) => execute_print(args),
        Commands::Probe => execute_probe(),
    }
}

fn execute_inspect(args: InspectArgs) -> Result<()> {
    let backend = DscBackend;
    let document = PsDocument::load(&backend, &args.input);
    if !document.is_valid() {
        bail!("could not load '{}'", args.input.display());
    }

    let (width, height) = document.size();
    println!("File: {}", document.path().display());
    println!("Pages: {}", document.page_count());
    println!("Size: {width} x {height} pt");
    println!("Paper: {}", document.paper());
    println!("Orientation: {}", document.orientation());
    for (index, page) in document.pages().iter().enumerate() {
        if page.is_valid() {
            println!(
                "  Page {}: {} x {} pt, {}, {}",
                index + 1,
                page.width(),
                page.height(),
                page.paper(),
                page.orientation()
            );
        } else {
            println!("  Page {}: unreadable", index + 1);
        }
    }
    Ok(())
}

fn execute_print(args: PrintArgs) -> Result<()> {
    let (print_range, page_range) = parse_pages(args.pages.as_deref())?;

    let settings = PrintSettings {
        printer_name: args.printer.clone(),
        doc_name: args.job_name.clone(),
        copies: args.copies,
        collate: args.collate,
        print_range,
        page_order: if args.reverse {
            PageOrder::LastPageFirst
        } else {
            PageOrder::FirstPageFirst
        },
        orientation: if args.landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        },
        duplex: args.duplex.into(),
        margins: args.margins.as_deref().map(parse_margins).transpose()?,
        output_file: args.output.clone(),
        cups_properties: args.options.iter().map(|raw| parse_property(raw)).collect(),
        ..Default::default()
    };

    let document_orientation = intrinsic_orientation(&args.inputs[0]);
    let delete_policy = if args.delete {
        FileDeletePolicy::SystemDeletesFiles
    } else {
        FileDeletePolicy::ApplicationDeletesFiles
    };
    let select_policy = if args.pages.is_some() {
        PageSelectPolicy::SystemSelectsPages
    } else {
        PageSelectPolicy::ApplicationSelectsPages
    };

    let code = print_files(
        &SystemRunner,
        &LocalServices,
        &settings,
        &args.inputs,
        document_orientation,
        delete_policy,
        select_policy,
        &page_range,
    );
    if !code.is_success() {
        bail!("{} (code {})", describe_failure(code), code.code());
    }
    Ok(())
}

fn execute_probe() -> Result<()> {
    let runner = SystemRunner;
    let yes_no = |present: bool| if present { "yes" } else { "no" };
    println!("cups: {}", yes_no(LocalServices.cups_available()));
    println!("ps2pdf: {}", yes_no(ps2pdf_available(&runner)));
    println!("psselect: {}", yes_no(psselect_available(&runner)));
    let client = ["lpr-cups", "lpr.cups", "lpr"]
        .iter()
        .find_map(|name| runner.find_executable(name));
    match client {
        Some(path) => println!("client: {}", path.display()),
        None => println!("client: none"),
    }
    Ok(())
}

/// The document's own orientation, used to avoid rotating a job twice.
/// An unreadable document defaults to portrait.
fn intrinsic_orientation(path: &std::path::Path) -> Orientation {
    let document = PsDocument::load(&DscBackend, path);
    if document.is_valid() {
        document.orientation()
    } else {
        Orientation::Portrait
    }
}

/// Parses `--pages`: "2-5" becomes an explicit range, "1,3,7" becomes a
/// selection with its compacted range string.
fn parse_pages(pages: Option<&str>) -> Result<(PrintRange, String)> {
    let Some(raw) = pages else {
        return Ok((PrintRange::AllPages, String::new()));
    };
    if let Some((from, to)) = raw.split_once('-') {
        if !raw.contains(',') {
            let from: u32 = from.trim().parse()?;
            let to: u32 = to.trim().parse()?;
            if from == 0 || to < from {
                bail!("invalid page range '{raw}'");
            }
            return Ok((PrintRange::PageRange { from, to }, format!("{from}-{to}")));
        }
    }
    let mut list = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if let Some((from, to)) = part.split_once('-') {
            let from: u32 = from.trim().parse()?;
            let to: u32 = to.trim().parse()?;
            if from == 0 || to < from {
                bail!("invalid page range '{part}'");
            }
            list.extend(from..=to);
        } else {
            let page: u32 = part.parse()?;
            if page == 0 {
                bail!("page numbers start at 1");
            }
            list.push(page);
        }
    }
    list.sort_unstable();
    list.dedup();
    let range = psprint_spooler::page_list_to_page_range(&list);
    Ok((PrintRange::Selection, range))
}

fn parse_margins(raw: &str) -> Result<Margins> {
    let values: Vec<&str> = raw.split(',').map(str::trim).collect();
    if values.len() != 4 {
        bail!("--margins expects four comma-separated values");
    }
    Ok(Margins {
        left: values[0].parse()?,
        top: values[1].parse()?,
        right: values[2].parse()?,
        bottom: values[3].parse()?,
    })
}

fn parse_property(raw: &str) -> (String, String) {
    match raw.split_once('=') {
        Some((key, value)) => (key.to_string(), value.to_string()),
        None => (raw.to_string(), String::new()),
    }
}

fn describe_failure(code: ExitCode) -> &'static str {
    match code {
        ExitCode::Client(_) => "spooler client reported an error",
        ExitCode::Crashed => "spooler client crashed",
        ExitCode::StartFailed => "spooler client could not be started",
        ExitCode::CopyFailed => "could not copy the job to the output file",
        ExitCode::InvalidPrinterState => "printer is not in a printable state",
        ExitCode::FileNotFound => "a file in the job was not found",
        ExitCode::EmptyFileName => "the job contains no printable files",
        ExitCode::SpoolerNotFound => "no spooler client found on this system",
        ExitCode::TempFileFailed => "could not create a temporary file",
    }
}
