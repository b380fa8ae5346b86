//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the tablebook data directory and database.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tablebook::config::{CONFIG_FILE_NAME, DEFAULT_DURATION_MINUTES, DEFAULT_LOCK_WAIT_SECONDS};
use tablebook::database::{resolve_data_dir, DATABASE_FILE_NAME};
use tablebook::{Database, DatabaseConfig};

/// Initialize the tablebook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize the data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

/// Default `config.yaml` written by `init --with-config`.
fn default_config_text() -> String {
    format!(
        "# tablebook configuration\n\
         # Booking length when a request gives none\n\
         default_duration_minutes: {DEFAULT_DURATION_MINUTES}\n\
         # Seconds to wait for another writer before giving up\n\
         maximum_lock_wait_seconds: {DEFAULT_LOCK_WAIT_SECONDS}\n\
         # One of: table, json, csv, tsv\n\
         output_format: table\n"
    )
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: This command ignores --disable-autoinit (it would be paradoxical).
    /// The --data-dir flag has a different meaning here (where to create, not where to find).
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Priority: command flag > global flag > environment > default
        let explicit = self.data_dir.or_else(|| global.data_dir.clone());
        let data_dir = resolve_data_dir(explicit.as_deref())?;
        let db_path = data_dir.join(DATABASE_FILE_NAME);
        let config_path = data_dir.join(CONFIG_FILE_NAME);

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize tablebook in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            if db_path.exists() {
                println!("  - Verify existing database: {}", db_path.display());
            } else {
                println!("  - Create database: {}", db_path.display());
            }

            if self.with_config {
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let data_dir_created = !data_dir.exists();
        fs::create_dir_all(&data_dir)?;

        let database_created = !db_path.exists();
        let db = Database::open(DatabaseConfig::new(&db_path))?;
        if !database_created {
            db.verify_integrity()?;
        }

        let config_created = self.with_config && write_default_config(&config_path)?;

        println!("Initialized tablebook in: {}", data_dir.display());

        if data_dir_created {
            println!("  - Created data directory");
        }

        if database_created {
            println!("  - Created database");
        } else {
            println!("  - Verified existing database");
        }

        if config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}

/// Writes the default configuration unless one already exists.
fn write_default_config(path: &Path) -> Result<bool, CliError> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, default_config_text())?;
    log::info!("wrote default configuration to {}", path.display());
    Ok(true)
}
