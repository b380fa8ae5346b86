//! Build script for tablebook-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("tablebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book restaurant tables and manage reservations")
        .long_about(
            "Command-line tool for booking restaurant tables, choosing table combinations \
             automatically and managing the reservation lifecycle",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("TABLEBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Additional configuration file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("TABLEBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the data directory, the database and optionally a default config.yaml"),
            Command::new("import")
                .about("Import restaurants and tables from a YAML catalog")
                .long_about("Load restaurants, opening hours and tables from a catalog file in one transaction"),
            Command::new("free-tables")
                .about("List free tables for a time window")
                .long_about("Show the active tables of a restaurant not held by any pending or confirmed booking"),
            Command::new("book")
                .about("Book a table")
                .long_about("Create a pending reservation, seating the party at up to three tables"),
            Command::new("set-status")
                .about("Change the status of a reservation")
                .long_about("Confirm, reject or cancel a reservation as a restaurant operator or administrator"),
            Command::new("cancel")
                .about("Cancel one of your own pending reservations")
                .long_about("Cancel a pending reservation that has not started yet"),
            Command::new("assign")
                .about("Add a table to a reservation")
                .long_about("Put a free table of the same restaurant on an existing reservation"),
            Command::new("unassign")
                .about("Remove a table from a reservation")
                .long_about("Take a table off an existing reservation"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display reservations for a restaurant, a guest, or all of them in pages"),
            Command::new("dashboard")
                .about("Show today's and tomorrow's bookings for a restaurant")
                .long_about("Summarize upcoming bookings and occupancy for a restaurant"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("tablebook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
