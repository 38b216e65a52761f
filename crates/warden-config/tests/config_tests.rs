// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Warden configuration system.

use std::io::Write;

use warden_config::diagnostic::ConfigError;
use warden_config::model::WardenConfig;
use warden_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_warden_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[logging]
level = "debug"
json = true

[auth]
realm = "internal"
require_authentication = false

[[auth.basic_users]]
username = "alice"
password = "wonderland"
roles = ["admin"]

[[auth.bearer_tokens]]
token = "tok-1"
subject = "ci"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert_eq!(config.auth.realm, "internal");
    assert!(!config.auth.require_authentication);
    assert_eq!(config.auth.basic_users.len(), 1);
    assert_eq!(config.auth.basic_users[0].password, "wonderland");
    assert_eq!(config.auth.bearer_tokens[0].subject, "ci");
}

/// Unknown field in [server] section produces an error mentioning it.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
hots = "0.0.0.0"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("hots"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown keys become diagnostics carrying a suggestion.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[auth]
relm = "typo"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    let suggestion = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { suggestion, .. } => suggestion.clone(),
        _ => None,
    });
    assert_eq!(suggestion.as_deref(), Some("realm"));
}

/// A basic user entry without a password is reported as a missing key.
#[test]
fn missing_password_is_reported() {
    let toml = r#"
[[auth.basic_users]]
username = "alice"
"#;

    let errors = load_and_validate_str(toml).expect_err("password is required");
    assert!(
        errors.iter().any(|e| matches!(
            e,
            ConfigError::MissingKey { key } if key.ends_with("password")
        )),
        "got: {errors:?}"
    );
}

/// Wrong value types are reported as invalid types.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[server]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("port must be an integer");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "got: {errors:?}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.auth.realm, "warden");
    assert!(config.auth.require_authentication);
}

/// Validation runs after a successful load.
#[test]
fn validation_errors_surface_from_load() {
    let toml = r#"
[[auth.basic_users]]
username = "alice"
password = "a"

[[auth.basic_users]]
username = "alice"
password = "b"
"#;

    let errors = load_and_validate_str(toml).expect_err("duplicate usernames");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("duplicate username")
    )));
}

/// Dotted overrides land on the right nested key (this is what the
/// `WARDEN_AUTH_REQUIRE_AUTHENTICATION` env mapping produces).
#[test]
fn dotted_override_sets_underscored_key() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: WardenConfig = Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::string("[auth]\nrealm = \"from-toml\"\n"))
        .merge(("auth.require_authentication", false))
        .merge(("auth.realm", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.auth.realm, "from-env");
    assert!(!config.auth.require_authentication);
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: WardenConfig = Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::file("/nonexistent/path/warden.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.auth.realm, "warden");
}

/// An explicit config path must exist.
#[test]
fn explicit_missing_path_is_an_error() {
    let errors = load_and_validate_path(std::path::Path::new("/nonexistent/warden.toml"))
        .expect_err("explicit path must exist");
    assert!(matches!(errors[0], ConfigError::Other(_)));
}

/// An explicit config file is loaded and validated.
#[test]
fn explicit_path_loads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 7070\n\n[auth]\nrealm = \"files\"").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.auth.realm, "files");
}
