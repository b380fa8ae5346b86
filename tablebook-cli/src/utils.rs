//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management and value parsing.

use crate::error::CliError;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::time::Duration;
use tablebook::config::OutputFormat;
use tablebook::database::{resolve_data_dir, DATABASE_FILE_NAME};
use tablebook::{Config, ConfigBuilder, Database, DatabaseConfig, OperationPlan};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Extra configuration file layered above the data directory's.
    pub config: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory from global options and the environment.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    resolve_data_dir(global.data_dir.as_deref()).map_err(CliError::from)
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. The file named by `--config`
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_data_dir(data_dir(global)?);
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options.
pub fn resolve_database_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    Ok(data_dir(global)?.join(DATABASE_FILE_NAME))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global)?;
    let autoinit = !global.disable_autoinit && config.autoinit();

    if !db_path.exists() && !autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let timeout_seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    let db_config = DatabaseConfig::new(db_path)
        .with_auto_create(autoinit)
        .with_busy_timeout(Duration::from_secs(timeout_seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(text: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!("invalid date '{text}', expected YYYY-MM-DD"))
    })
}

/// Parse an optional date argument, defaulting to today's local date.
pub fn date_or_today(text: Option<&str>) -> Result<NaiveDate, CliError> {
    text.map_or_else(|| Ok(Local::now().date_naive()), parse_date)
}

/// Pick the output format from the flag or the configuration.
pub fn output_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat, CliError> {
    match flag {
        Some(name) => OutputFormat::parse(name).ok_or_else(|| {
            CliError::InvalidArguments(format!(
                "unknown format '{name}', expected json, csv, tsv or table"
            ))
        }),
        None => Ok(config.format()),
    }
}

/// Print the actions a plan would take, for `--dry-run`.
pub fn print_dry_run(plan: &OperationPlan, global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    eprintln!("Dry run - would perform the following actions:");
    if plan.is_empty() {
        eprintln!("  (nothing to do)");
    }
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    if !plan.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &plan.warnings {
            eprintln!("  - {warning}");
        }
    }
}

/// Print plan warnings to stderr unless `--quiet` is set.
pub fn print_warnings(warnings: &[String], global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Join table ids for display, e.g. `3,7`.
pub fn join_ids<T: std::fmt::Display>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
