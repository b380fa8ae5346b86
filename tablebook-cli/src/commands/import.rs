//! Import command implementation.
//!
//! Loads restaurants, their opening hours and tables from a YAML catalog.

use crate::error::CliError;
use crate::utils::{join_ids, load_configuration, open_database, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use tablebook::catalog::Catalog;

/// Import restaurants and tables from a YAML catalog.
#[derive(Args)]
pub struct ImportCommand {
    /// Catalog file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validate the catalog without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Parse and validate the whole catalog before touching the store
        let catalog = Catalog::load_file(&self.file)?;

        if self.dry_run {
            if !global.quiet {
                eprintln!(
                    "Dry run - would import {} restaurants with {} tables:",
                    catalog.restaurants.len(),
                    catalog.table_count()
                );
                for restaurant in &catalog.restaurants {
                    eprintln!("  - {} ({} tables)", restaurant.name, restaurant.tables.len());
                }
            }
            return Ok(());
        }

        // 2. Insert everything in one transaction
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let imported = db.import_catalog(&catalog)?;

        // 3. One line per restaurant: id, name, table ids
        for restaurant in &imported {
            println!(
                "{}\t{}\t{}",
                restaurant.id,
                restaurant.name,
                join_ids(&restaurant.table_ids)
            );
        }

        if global.verbose {
            eprintln!(
                "Imported {} restaurants with {} tables",
                imported.len(),
                catalog.table_count()
            );
        }

        Ok(())
    }
}
