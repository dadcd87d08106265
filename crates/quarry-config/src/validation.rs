// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: known log levels, well-formed
//! disabled item keys, and non-empty names and paths.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::QuarryConfig;

/// Levels accepted by `daemon.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &QuarryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.daemon.name.trim().is_empty() {
        errors.push(invalid("daemon.name must not be empty".to_string()));
    }

    let level = config.daemon.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(invalid(format!(
            "daemon.log_level `{}` is not one of {}",
            config.daemon.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let mut seen = HashSet::new();
    for key in &config.registry.disabled {
        match key.split_once('.') {
            Some((registry, item)) if !registry.is_empty() && !item.is_empty() => {
                if !seen.insert(key.as_str()) {
                    errors.push(invalid(format!(
                        "registry.disabled lists `{key}` more than once"
                    )));
                }
            }
            _ => errors.push(invalid(format!(
                "registry.disabled entry `{key}` must look like `<registry>.<item>`"
            ))),
        }
    }

    if config.filesystem.config_path.trim().is_empty() {
        errors.push(invalid(
            "filesystem.config_path must not be empty".to_string(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation { message }
}
