//! RadTools CLI - installs devtools and UI components into Next.js projects

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use radtools_core::exit_code;
use radtools_core::tui::InitArgs;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "RADTOOLS_LOG";

#[derive(Parser, Debug)]
#[command(name = "radtools")]
#[command(about = "Install RadTools devtools and UI components into a Next.js + Tailwind project")]
#[command(version, disable_version_flag = true, disable_help_subcommand = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install RadTools into the project in the current directory
    Init(CliInitArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Overwrite existing components, hooks, and API routes
    #[arg(short, long)]
    pub force: bool,

    /// Show what would change without writing any files
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Add required packages with the detected package manager
    #[arg(long)]
    pub install: bool,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            directory: args.directory,
            template_dir: args.template_dir,
            force: args.force,
            dry_run: args.dry_run,
            install: args.install,
        }
    }
}

/// Clap command with `-v/--version` in place of the default `-V`
fn cli() -> clap::Command {
    Args::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    )
}

/// Argument clap rejected, when it is the command position.
///
/// `first` is the raw first argument; it may not be valid UTF-8.
fn unknown_command(err: &clap::Error, first: Option<&OsStr>) -> Option<String> {
    if !matches!(
        err.kind(),
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument | ErrorKind::InvalidUtf8
    ) {
        return None;
    }
    let first = first?.to_string_lossy().into_owned();
    let offending = [ContextKind::InvalidSubcommand, ContextKind::InvalidArg]
        .into_iter()
        .find_map(|kind| match err.get(kind) {
            Some(ContextValue::String(value)) => Some(value.clone()),
            _ => None,
        });
    match offending {
        Some(value) if !first.starts_with(value.as_str()) => None,
        _ => Some(first),
    }
}

fn print_help() {
    // Nothing useful to do if stdout is gone
    let _ = cli().print_help();
    println!();
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new("radtools=warn,radtools_core=warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully; files already written stay written
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_logging();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = err.print();
                return ExitCode::SUCCESS;
            }
            let first = std::env::args_os().nth(1);
            if let Some(command) = unknown_command(&err, first.as_deref()) {
                eprintln!("{}", format!("Unknown command: {}", command).red());
                eprintln!();
                print_help();
            } else {
                let _ = err.print();
            }
            return ExitCode::from(exit_code::USAGE);
        }
    };

    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(exit_code::USAGE);
        }
    };

    match args.command {
        Some(Command::Init(init_args)) => {
            let result = radtools_core::run(init_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            match result {
                Ok(code) => ExitCode::from(code),
                Err(e) => {
                    eprintln!("{} {:#}", "error:".red(), e);
                    ExitCode::from(exit_code::ABORTED)
                }
            }
        }
        None => {
            // No subcommand provided: show usage
            print_help();
            ExitCode::SUCCESS
        }
    }
}
