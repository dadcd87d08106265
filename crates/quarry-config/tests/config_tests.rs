// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Quarry configuration system.

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use quarry_config::diagnostic::{figment_to_config_errors, ConfigError};
use quarry_config::model::QuarryConfig;
use quarry_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[daemon]
name = "edge-01"
log_level = "debug"

[registry]
setup_on_start = false
disabled = ["config.http", "logger.syslog"]

[filesystem]
config_path = "/tmp/quarry.conf"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.daemon.name, "edge-01");
    assert_eq!(config.daemon.log_level, "debug");
    assert!(!config.registry.setup_on_start);
    assert_eq!(config.registry.disabled, vec!["config.http", "logger.syslog"]);
    assert_eq!(config.filesystem.config_path, "/tmp/quarry.conf");
}

#[test]
fn unknown_field_in_daemon_is_rejected() {
    let toml = r#"
[daemon]
log_levl = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("log_levl"),
        "error should mention the unknown field, got: {err_str}"
    );
}

#[test]
fn unknown_field_becomes_suggestion() {
    let toml = r#"
[registry]
disabeld = []
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let suggestion = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { suggestion, .. } => suggestion.clone(),
        _ => None,
    });
    assert_eq!(suggestion.as_deref(), Some("disabled"));
}

#[test]
fn wrong_type_is_reported() {
    let err = load_config_from_str("[registry]\nsetup_on_start = [1]\n").unwrap_err();
    let errors = figment_to_config_errors(err, &[]);
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }));
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.daemon.name, "quarry");
    assert_eq!(config.daemon.log_level, "info");
    assert!(config.registry.setup_on_start);
    assert!(config.registry.disabled.is_empty());
    assert_eq!(config.filesystem.config_path, "/etc/quarry/quarry.conf");
}

/// `QUARRY_REGISTRY_SETUP_ON_START` lands on `registry.setup_on_start`.
#[test]
fn dotted_override_reaches_underscored_key() {
    let config: QuarryConfig = Figment::new()
        .merge(Serialized::defaults(QuarryConfig::default()))
        .merge(Toml::string("[registry]\nsetup_on_start = true\n"))
        .merge(("registry.setup_on_start", false))
        .extract()
        .expect("should merge override");

    assert!(!config.registry.setup_on_start);
}

#[test]
fn semantic_errors_surface_from_str() {
    let errors = load_and_validate_str("[daemon]\nlog_level = \"chatty\"\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn explicit_path_is_loaded_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quarry.toml");
    std::fs::write(&path, "[filesystem]\nconfig_path = \"/srv/quarry.conf\"\n").unwrap();

    let config = load_and_validate_path(&path).unwrap();
    assert_eq!(config.filesystem.config_path, "/srv/quarry.conf");
}

#[test]
fn explicit_path_errors_suggest_fix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quarry.toml");
    std::fs::write(&path, "[daemon]\nnmae = \"x\"\n").unwrap();

    let errors = load_and_validate_path(&path).unwrap_err();
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            ..
        } => {
            assert_eq!(key, "nmae");
            assert_eq!(suggestion.as_deref(), Some("name"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}
