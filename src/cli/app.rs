//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use super::output::{Output, OutputFormat};
use super::{book, member, report};
use crate::domain::Library;
use crate::storage::{Config, FileStore, SnapshotStore};

#[derive(Parser)]
#[command(name = "circ")]
#[command(author, version, about = "Local-first circulation manager for small libraries")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Data directory (defaults to the per-user data dir)
    #[arg(long, global = true, env = "CIRC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the book catalog and circulation
    #[command(subcommand)]
    Book(book::BookCommands),

    /// Manage library members
    #[command(subcommand)]
    Member(member::MemberCommands),

    /// Show a member's active loans
    Loans {
        /// Member ID
        member: String,
    },

    /// Circulation reports
    #[command(subcommand)]
    Report(report::ReportCommands),

    /// Show library totals
    Status,
}

/// Parses arguments and runs the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load()?;
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    output.verbose(&format!("data dir: {}", data_dir.display()));

    let store = SnapshotStore::new(FileStore::new(&data_dir));
    let mut library = Library::with_state(store.load());
    library.register_observer(Box::new(store));

    match cli.command {
        Commands::Book(cmd) => book::run(cmd, &mut library, &output),
        Commands::Member(cmd) => member::run(cmd, &mut library, &output),
        Commands::Loans { member } => member::show_loans(&library, &member, &output),
        Commands::Report(cmd) => report::run(cmd, &library, &output),
        Commands::Status => report::show_status(&library, &output),
    }
}
