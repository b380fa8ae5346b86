//! Configuration layering tests: files, environment and overrides.

mod common;

use std::env;
use std::fs;

use common::{monday, TestStore};
use serial_test::serial;
use tablebook::config::{ConfigBuilder, OutputFormat, CONFIG_FILE_NAME};
use tablebook::operations::BookingRequest;
use tablebook::{create_reservation, Config, UserId};

const ENV_VARS: [&str; 4] = [
    "TABLEBOOK_DEFAULT_DURATION_MINUTES",
    "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "TABLEBOOK_OUTPUT_FORMAT",
    "TABLEBOOK_DISABLE_AUTOINIT",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_precedence_user_file_explicit_env_override() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "default_duration_minutes: 60\noutput_format: csv\nmaximum_lock_wait_seconds: 3\n",
    )
    .unwrap();
    let explicit = dir.path().join("override.yaml");
    fs::write(&explicit, "default_duration_minutes: 75\n").unwrap();

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .with_config_file(&explicit)
        .build()
        .unwrap();
    assert_eq!(config.duration_minutes(), 75);
    assert_eq!(config.format(), OutputFormat::Csv);

    env::set_var("TABLEBOOK_DEFAULT_DURATION_MINUTES", "120");
    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .with_config_file(&explicit)
        .build()
        .unwrap();
    assert_eq!(config.duration_minutes(), 120);

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .with_config(Config {
            maximum_lock_wait_seconds: Some(9),
            ..Default::default()
        })
        .build()
        .unwrap();
    assert_eq!(config.lock_wait_seconds(), 9);
    assert_eq!(config.duration_minutes(), 120);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_rejected() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "default_duration_minutes: 0\n").unwrap();
    assert!(ConfigBuilder::new().with_data_dir(dir.path()).build().is_err());

    fs::write(dir.path().join(CONFIG_FILE_NAME), "opening_hours: {}\n").unwrap();
    assert!(ConfigBuilder::new().with_data_dir(dir.path()).build().is_err());

    env::set_var("TABLEBOOK_OUTPUT_FORMAT", "xml");
    assert!(ConfigBuilder::new().skip_files().build().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_configured_duration_drives_bookings() {
    clear_env();
    let store = TestStore::new();
    let (restaurant, _) = store.restaurant_with_tables(&[2]);
    let mut db = store.open();

    let config = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            default_duration_minutes: Some(30),
            ..Default::default()
        })
        .build()
        .unwrap();

    let request = BookingRequest::new(restaurant, UserId::new(1), monday(), "21:30", 2);
    let reservation = create_reservation(&mut db, &request, &config).unwrap();
    assert_eq!(reservation.duration_minutes(), 30);

    // An explicit duration still wins
    let request = BookingRequest::new(restaurant, UserId::new(1), monday(), "12:00", 2)
        .with_duration(Some(150));
    let reservation = create_reservation(&mut db, &request, &config).unwrap();
    assert_eq!(reservation.duration_minutes(), 150);
}
