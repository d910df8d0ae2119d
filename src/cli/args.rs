//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    build::BuildCommands, clear::ClearArgs, completions::CompletionsArgs, init::InitArgs,
    install::InstallArgs, nodes::NodesArgs, part::PartCommands, remove::RemoveArgs,
    reset::ResetArgs, select::SelectArgs, status::StatusArgs,
};

#[derive(Parser)]
#[command(name = "rig")]
#[command(author, version, about = "Rig Kit - PC build planning toolkit")]
#[command(
    long_about = "A CLI for planning PC builds as plain-text JSON documents: browse a part catalog, install parts into an ongoing build with compatibility validation and live scoring, and save builds for later."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .rig/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new rig workspace with a seed part catalog
    Init(InitArgs),

    /// Part catalog queries
    #[command(subcommand)]
    Part(PartCommands),

    /// Install a part into the current build
    Install(InstallArgs),

    /// Remove a part from the current build
    Remove(RemoveArgs),

    /// List the mount nodes currently open for installation
    Nodes(NodesArgs),

    /// Select a mount node for the next install
    Select(SelectArgs),

    /// Show the current build: parts, stats, pending notices
    Status(StatusArgs),

    /// Clear pending notices
    Clear(ClearArgs),

    /// Reset the current build to empty
    Reset(ResetArgs),

    /// Saved build management
    #[command(subcommand)]
    Build(BuildCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (human tables for terminals)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Just IDs, one per line
    Id,
}
