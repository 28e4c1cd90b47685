use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use logsweep::{sweep, OutputFormat, SweepError, SweepOptions};

#[derive(Parser)]
#[command(name = "logsweep")]
#[command(about = "Convert print() calls in Swift sources into LoggingService calls")]
#[command(long_about = "Recursively rewrites print(\"...\") calls in every .swift file under a directory
into categorized logger calls, and declares the shared logger where a file needs it.

MARKERS:
  print(\"🔄 [Tag] msg\")  ->  logger.debug(\"msg\", category: .general)
  print(\"✅ msg\")        ->  logger.info(\"msg\", category: .general)
  print(\"❌ msg\")        ->  logger.error(\"msg\", category: .general)
  print(\"⚠️ msg\")        ->  logger.warning(\"msg\", category: .general)
  print(\"🎤 msg\")        ->  logger.info(\"msg\", category: .audio)
  print(\"📊 msg\")        ->  logger.debug(\"msg\", category: .performance)
  print(\"🔧 msg\")        ->  logger.debug(\"msg\", category: .general)
  print(\"msg\")           ->  logger.debug(\"msg\", category: .general)")]
#[command(after_help = "Examples:
  logsweep Sources
  logsweep Sources --dry-run --format diff
  logsweep . --exclude Tests --exclude \"*Generated*\"")]
#[command(version)]
struct Cli {
    /// Directory to scan for .swift files
    source_directory: PathBuf,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Output format: "default" or "diff"
    #[arg(long, default_value = "default", value_parser = ["default", "diff"])]
    format: String,

    /// Exclude paths matching these patterns (can be used multiple times)
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Enable debug logging (overridden by LOGSWEEP_LOG)
    #[arg(short, long)]
    verbose: bool,
}

/// What the command line asked for.
enum Invocation {
    Sweep(Cli),
    /// `--help` or `--version`: clap renders the text.
    Info(clap::Error),
}

/// Parse arguments. Anything clap rejects becomes [`SweepError::Usage`].
fn parse_cli<I, T>(args: I) -> logsweep::Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Invocation::Sweep(cli)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => Ok(Invocation::Info(e)),
        Err(e) => Err(SweepError::Usage(e.render().to_string())),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("LOGSWEEP_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be set when run() is called more than once in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the tool and return the process exit status: 0 on completion,
/// 1 for usage errors or a missing root. Per-file failures do not change it.
fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match parse_cli(args) {
        Ok(Invocation::Sweep(cli)) => cli,
        Ok(Invocation::Info(e)) => {
            let _ = e.print();
            return 0;
        }
        Err(err) => {
            eprint!("{err}");
            return 1;
        }
    };

    init_tracing(cli.verbose);

    let options = SweepOptions {
        dry_run: cli.dry_run,
        format: match cli.format.as_str() {
            "diff" => OutputFormat::Diff,
            _ => OutputFormat::Default,
        },
        exclude: cli.exclude,
    };

    match sweep(&cli.source_directory, &options) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn main() -> ExitCode {
    ExitCode::from(run(std::env::args_os()))
}
