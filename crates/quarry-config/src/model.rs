// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Quarry daemon.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Quarry configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuarryConfig {
    /// Daemon identity and logging settings.
    #[serde(default)]
    pub daemon: DaemonConfig,

    /// Registry bootstrap settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Built-in filesystem config plugin settings.
    #[serde(default)]
    pub filesystem: FilesystemConfig,
}

/// Daemon identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    /// Name reported in logs.
    #[serde(default = "default_daemon_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            name: default_daemon_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_daemon_name() -> String {
    "quarry".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Registry bootstrap configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Run setup on every auto-setup registry before serving commands.
    #[serde(default = "default_setup_on_start")]
    pub setup_on_start: bool,

    /// `"<registry>.<item>"` keys that are never registered.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            setup_on_start: default_setup_on_start(),
            disabled: Vec::new(),
        }
    }
}

fn default_setup_on_start() -> bool {
    true
}

/// Filesystem config plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemConfig {
    /// JSON document served by the `config.filesystem` item.
    #[serde(default = "default_config_path")]
    pub config_path: String,
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
        }
    }
}

fn default_config_path() -> String {
    "/etc/quarry/quarry.conf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = QuarryConfig::default();
        assert_eq!(config.daemon.name, "quarry");
        assert_eq!(config.daemon.log_level, "info");
        assert!(config.registry.setup_on_start);
        assert!(config.registry.disabled.is_empty());
        assert_eq!(config.filesystem.config_path, "/etc/quarry/quarry.conf");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: QuarryConfig = toml::from_str(
            r#"
[registry]
disabled = ["config.http"]
"#,
        )
        .unwrap();
        assert_eq!(config.registry.disabled, vec!["config.http"]);
        assert!(config.registry.setup_on_start);
        assert_eq!(config.daemon.name, "quarry");
    }
}
