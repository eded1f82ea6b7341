//! UE Class Wizard - add Unreal Engine C++ classes from the terminal
//!
//! Indexes every `UCLASS` in the engine and project sources, lets the user pick
//! a base class, and writes the new header/source pair following the module's
//! Public/Private layout.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ueclass::cli::{ClassesArgs, CliResult, ConfigArgs, NewArgs, ProjectArgs};

/// UE Class Wizard - add Unreal Engine C++ classes from the terminal
#[derive(Parser, Debug)]
#[command(name = "ueclass", author, version, about, long_about = None)]
struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new class deriving from an indexed base class
    New(NewArgs),
    /// List classes available as base classes
    Classes(ClassesArgs),
    /// Show project and engine discovery results
    Project(ProjectArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "ueclass=debug" } else { "ueclass=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn run(command: &Command) -> CliResult<()> {
    match command {
        Command::New(args) => args.execute(),
        Command::Classes(args) => args.execute(),
        Command::Project(args) => args.execute(),
        Command::Config(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli.command) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
