use std::path::PathBuf;

use clap::CommandFactory;
use storeinit_core::{AppConfig, Environment};

use super::*;

#[test]
fn parses_without_arguments() {
    let cli = Cli::try_parse_from(["storeinit"]);
    assert!(cli.is_ok(), "expected valid cli args, got: {cli:?}");
}

#[test]
fn rejects_unknown_flags() {
    let result = Cli::try_parse_from(["storeinit", "--dry-run"]);
    assert!(result.is_err());
}

#[test]
fn rejects_positional_arguments() {
    let result = Cli::try_parse_from(["storeinit", "seed"]);
    assert!(result.is_err());
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

fn config_for(env: Environment) -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/store".to_string(),
        env,
        log_level: "info".to_string(),
        db_max_connections: 5,
        db_min_connections: 1,
        db_acquire_timeout_secs: 10,
        demo_catalog_path: PathBuf::from("./config/demo_catalog.yaml"),
        populate_command: None,
        bcrypt_cost: 4,
    }
}

#[test]
fn production_environment_is_refused() {
    let err = ensure_test_data_allowed(&config_for(Environment::Production)).unwrap_err();
    assert!(err.to_string().contains("STOREINIT_ENV is production"));
}

#[test]
fn development_and_test_environments_are_allowed() {
    assert!(ensure_test_data_allowed(&config_for(Environment::Development)).is_ok());
    assert!(ensure_test_data_allowed(&config_for(Environment::Test)).is_ok());
}
