//! Main entry point for the tablebook CLI.
//!
//! This is the command-line interface for the tablebook reservation engine.
//! It provides commands for managing restaurant bookings:
//! - `import`: Load restaurants and tables from a catalog file
//! - `book`: Book a table, choosing tables automatically or explicitly
//! - `set-status` / `cancel`: Move reservations through their lifecycle
//! - `assign` / `unassign`: Manage a reservation's tables by hand
//! - `list` / `dashboard`: Inspect reservations

use clap::Parser;
use tablebook_cli::cli::{Cli, Command};
use tablebook_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _ = tablebook::init_logger(cli.verbose, cli.quiet).install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        config: cli.config,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::Import(cmd) => cmd.execute(&global),
        Command::FreeTables(cmd) => cmd.execute(&global),
        Command::Book(cmd) => cmd.execute(&global),
        Command::SetStatus(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::Assign(cmd) => cmd.execute(&global),
        Command::Unassign(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Dashboard(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
