//! Framealign: align sparse frame transcripts to every frame of a video.
//!
//! A transcript records, for a handful of frames, what a reader should see
//! on them (say, a speaker's name and an on-screen clock). Framealign expands
//! it to one entry per frame by carrying each record forward until the next
//! one, pairing every entry with that frame's image.
//!
//! # Modules
//!
//! - [`transcript`]: Transcript line parsing and frame-number recovery
//! - [`frames`]: Frame file patterns and payload loaders
//! - [`align`]: The aligning iterator
//! - [`check`]: Transcript diagnostics and reporting
//! - [`config`]: CLI configuration
//! - [`error`]: Error types for framealign operations

pub mod align;
pub mod check;
pub mod config;
pub mod error;
pub mod frames;
pub mod logging;
pub mod transcript;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use align::{AlignedFrame, Aligner, FrameOrigin};
use config::AlignConfig;
use frames::{FrameInfo, ImageProbe};

pub use error::AlignError;

/// The framealign CLI application.
#[derive(Parser)]
#[command(name = "framealign")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true, env = "FRAMEALIGN_CONFIG")]
    config: Option<PathBuf>,

    /// Log level filter, overriding the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Expand a transcript to one row per frame.
    Align(AlignArgs),
    /// Check a transcript for problems alignment would paper over.
    Check(CheckArgs),
}

/// Arguments for the align subcommand.
#[derive(clap::Args)]
struct AlignArgs {
    /// Transcript file to align.
    transcript: PathBuf,

    /// Directory holding the frame images.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Frame file name pattern, e.g. 'image%d.png'.
    #[arg(long)]
    pattern: Option<String>,

    /// Output format ('text', 'tsv', or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Print alignment counters to stderr when done.
    #[arg(long)]
    stats: bool,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Transcript file to check.
    transcript: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the framealign CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AlignError> {
    let cli = Cli::parse();

    let mut config = AlignConfig::load_or_default(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init_logging(&config.logging)?;

    match cli.command {
        Some(Commands::Align(args)) => run_align(args, config),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("framealign {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Align sparse frame transcripts to every frame of a video.");
            println!();
            println!("Run 'framealign --help' for usage information.");
            Ok(())
        }
    }
}

/// One row of TSV output.
#[derive(Serialize)]
struct TsvRow<'a> {
    frame: u64,
    origin: FrameOrigin,
    path: String,
    width: Option<u32>,
    height: Option<u32>,
    label_a: &'a str,
    label_b: &'a str,
}

impl<'a> TsvRow<'a> {
    fn new(frame: &'a AlignedFrame<FrameInfo>) -> Self {
        Self {
            frame: frame.index.as_u64(),
            origin: frame.origin,
            path: frame.path.display().to_string(),
            width: frame.payload.as_ref().map(|info| info.width),
            height: frame.payload.as_ref().map(|info| info.height),
            label_a: &frame.labels.a,
            label_b: &frame.labels.b,
        }
    }
}

/// Execute the align subcommand.
fn run_align(args: AlignArgs, mut config: AlignConfig) -> Result<(), AlignError> {
    if let Some(frames) = args.frames {
        config.frames_dir = frames;
    }
    if let Some(pattern) = args.pattern {
        config.pattern = pattern;
    }

    if !matches!(args.output.as_str(), "text" | "tsv" | "json") {
        return Err(AlignError::UnsupportedFormat(format!(
            "'{}' (supported: text, tsv, json)",
            args.output
        )));
    }

    let locator = config.locator()?;
    let mut aligner = Aligner::open(&args.transcript, locator, ImageProbe)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.output.as_str() {
        "tsv" => {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .from_writer(&mut out);
            for frame in aligner.by_ref() {
                let frame = frame?;
                writer.serialize(TsvRow::new(&frame))?;
            }
            writer.flush()?;
        }
        "json" => {
            for frame in aligner.by_ref() {
                let frame = frame?;
                serde_json::to_writer(&mut out, &frame).map_err(io::Error::other)?;
                writeln!(out)?;
            }
        }
        _ => {
            for frame in aligner.by_ref() {
                let frame = frame?;
                let size = match &frame.payload {
                    Some(info) => format!("{}x{}", info.width, info.height),
                    None => "missing".to_string(),
                };
                writeln!(
                    out,
                    "{:>6}  {:<11}  {:<9}  {}\t{}",
                    frame.index.as_u64(),
                    origin_name(frame.origin),
                    size,
                    frame.labels.a,
                    frame.labels.b
                )?;
            }
        }
    }
    out.flush()?;

    if args.stats {
        eprint!("{}", aligner.stats());
    }

    Ok(())
}

fn origin_name(origin: FrameOrigin) -> &'static str {
    match origin {
        FrameOrigin::Annotated => "annotated",
        FrameOrigin::GapFilled => "gap-filled",
        FrameOrigin::Unannotated => "unannotated",
    }
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), AlignError> {
    let report = check::check_transcript_file(&args.transcript)?;

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            println!("{}", json);
        }
        "text" => print!("{}", report),
        other => {
            return Err(AlignError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(AlignError::CheckFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
