//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AssignCommand, BookCommand, CancelCommand, CompletionsCommand, DashboardCommand,
    FreeTablesCommand, ImportCommand, InitCommand, ListCommand, SetStatusCommand,
    UnassignCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking restaurant tables.
#[derive(Parser)]
#[command(name = "tablebook")]
#[command(version, about = "Book restaurant tables and manage reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "TABLEBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Additional configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "TABLEBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Import restaurants and tables from a YAML catalog
    Import(ImportCommand),

    /// List free tables for a time window
    FreeTables(FreeTablesCommand),

    /// Book a table
    Book(BookCommand),

    /// Change the status of a reservation
    SetStatus(SetStatusCommand),

    /// Cancel one of your own pending reservations
    Cancel(CancelCommand),

    /// Add a table to a reservation
    Assign(AssignCommand),

    /// Remove a table from a reservation
    Unassign(UnassignCommand),

    /// List reservations
    List(ListCommand),

    /// Show today's and tomorrow's bookings for a restaurant
    Dashboard(DashboardCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
