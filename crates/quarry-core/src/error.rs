// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Quarry capability registry.

use thiserror::Error;

/// The primary error type returned by plugins and registry operations.
///
/// Every variant here describes an expected outcome (bad name, failed setup,
/// unimplemented action). Internal wiring mistakes are not represented: those
/// lookups panic instead.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// An item with the same name is already bound in the registry.
    #[error("Duplicate registry item exists: {item}")]
    DuplicateItem { registry: String, item: String },

    /// A call named an item the registry does not hold.
    #[error("Cannot call registry item: {item}")]
    ItemNotFound { registry: String, item: String },

    /// A call named a registry the catalog does not hold.
    #[error("Cannot call {registry}:{item}")]
    RegistryNotFound { registry: String, item: String },

    /// An item was added to a registry that was never created.
    #[error("Unknown registry: {registry}")]
    UnknownRegistry { registry: String },

    /// The plugin does not override `Plugin::call`.
    #[error("plugin does not implement call")]
    NotImplemented,

    /// The plugin refused to set up.
    #[error("setup failed: {0}")]
    SetupFailed(String),

    /// A plugin-specific failure while serving a request.
    #[error("plugin error: {0}")]
    Plugin(String),

    /// A response row carrying `key` was expected but not present.
    #[error("response has no `{key}` field")]
    MissingResponseKey { key: String },

    /// A packed response field could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O performed by a plugin failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors surfaced through plugin setup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
