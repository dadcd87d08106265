// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in registries and the items shipped with the daemon.

pub mod filesystem;
pub mod platform;
pub mod stderr_logger;

use quarry_config::QuarryConfig;
use quarry_core::Plugin;
use quarry_registry::Bootstrap;

pub use filesystem::FilesystemConfigPlugin;
pub use platform::PlatformTable;
pub use stderr_logger::StderrLogger;

/// Items that produce configuration documents.
pub trait ConfigPlugin: Plugin {}

/// Items that receive log lines.
pub trait LoggerPlugin: Plugin {}

/// Items that generate table rows on demand.
pub trait TablePlugin: Plugin {}

/// Declare the built-in registries and register their items, in order.
pub fn register_builtins(boot: &mut Bootstrap<'_>, config: &QuarryConfig) {
    boot.create_registry::<dyn ConfigPlugin>("config")
        .create_registry::<dyn LoggerPlugin>("logger")
        .create_lazy_registry::<dyn TablePlugin>("table")
        .register_with(
            "config",
            "filesystem",
            FilesystemConfigPlugin::new(&config.filesystem.config_path),
        )
        .register::<StderrLogger>("logger", "stderr")
        .register::<PlatformTable>("table", "platform");
}
