//! Binary entry point for linkdeck.
//!
//! This binary provides the CLI interface for the linkdeck link dashboard.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use linkdeck::cli::{
    AddCommand, CommandContext, DeleteCommand, EditCommand, ListCommand, OutputFormat,
    ResetCommand, StatusCommand, run_shell,
};
use linkdeck::config::LinkdeckConfig;
use linkdeck::observability::{self, InitOptions, ObservabilityHandle};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Linkdeck - a local-first dashboard of bookmarked links.
#[derive(Parser)]
#[command(name = "linkdeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Keep links in memory only for this run.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Show links, optionally filtered by title.
    List {
        /// Case-insensitive title search.
        #[arg(short, long, default_value = "")]
        search: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Add a link.
    Add {
        /// Link title.
        #[arg(short, long)]
        title: String,

        /// Link URL.
        #[arg(short, long)]
        url: String,

        /// Star the link.
        #[arg(long)]
        starred: bool,
    },

    /// Edit the link at a row.
    Edit {
        /// Row number as shown by `list` with the same search.
        row: usize,

        /// Search the row number refers to.
        #[arg(short, long, default_value = "")]
        search: String,

        /// New title.
        #[arg(short, long)]
        title: Option<String>,

        /// New URL.
        #[arg(short, long)]
        url: Option<String>,

        /// New starred flag.
        #[arg(long)]
        starred: Option<bool>,
    },

    /// Delete the link at a row.
    Delete {
        /// Row number as shown by `list` with the same search.
        row: usize,

        /// Search the row number refers to.
        #[arg(short, long, default_value = "")]
        search: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive shell.
    Shell,

    /// Clear saved links so the next start re-seeds.
    Reset,

    /// Show storage, startup and metrics status.
    Status,
}

fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match LinkdeckConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let observability = match observability::init_from_config(
        &config,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config, &observability) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(
    cli: Cli,
    config: LinkdeckConfig,
    observability: &ObservabilityHandle,
) -> linkdeck::Result<()> {
    let context = CommandContext::new(config, cli.ephemeral);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if matches!(cli.command, Commands::Reset) {
        return ResetCommand::new().run(&context, &mut out);
    }

    let (mut controller, outcome) = context.start()?;

    match cli.command {
        Commands::List { search, format } => {
            ListCommand { search, format }.run(&mut controller, &mut out)
        },
        Commands::Add {
            title,
            url,
            starred,
        } => AddCommand {
            title,
            url,
            starred,
        }
        .run(&mut controller, &mut out),
        Commands::Edit {
            row,
            search,
            title,
            url,
            starred,
        } => EditCommand {
            row,
            search,
            title,
            url,
            starred,
        }
        .run(&mut controller, &mut out),
        Commands::Delete { row, search, yes } => DeleteCommand { row, search, yes }.run(
            &mut controller,
            &mut io::stdin().lock(),
            &mut out,
        ),
        Commands::Shell => run_shell(&mut controller, &mut io::stdin().lock(), &mut out),
        Commands::Status => StatusCommand::new().run(
            &context,
            &controller,
            &outcome,
            observability.metrics(),
            &mut out,
        ),
        Commands::Reset => Ok(()),
    }
}
