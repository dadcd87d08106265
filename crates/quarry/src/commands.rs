// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand execution against a bootstrapped catalog.

use std::io::Write;
use std::sync::Arc;

use clap::Subcommand;
use quarry_config::QuarryConfig;
use quarry_core::{PluginRequest, QuarryError};
use quarry_registry::{Bootstrap, Registry};
use tracing::info;

use crate::builtin;

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the route table of every registry as JSON.
    Broadcast,
    /// List registry names, or the items of one registry.
    List {
        /// Registry whose items to list.
        registry: Option<String>,
    },
    /// Call an item and print its reply as JSON.
    Call {
        registry: String,
        item: String,
        /// Request parameter as `key=value`; repeatable.
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

/// Parse a `key=value` request parameter.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

/// Build the catalog from configuration and, if enabled, run setup.
pub fn bootstrap(config: &QuarryConfig) -> Arc<Registry> {
    let registry = Arc::new(Registry::new());
    let mut boot = Bootstrap::new(&registry).disable(config.registry.disabled.iter().cloned());
    builtin::register_builtins(&mut boot, config);
    let rejected = boot.finish();

    if config.registry.setup_on_start {
        registry.setup();
    }
    info!(
        daemon = %config.daemon.name,
        registries = registry.count(),
        rejected = rejected.len(),
        "catalog ready"
    );
    registry
}

/// Run `command`, writing its output to `out`.
///
/// Returns `Ok(false)` when the command ran but the call it made failed.
pub fn execute(
    command: Command,
    registry: &Registry,
    out: &mut impl Write,
) -> Result<bool, QuarryError> {
    match command {
        Command::Broadcast => {
            write_json(out, &registry.broadcast())?;
            Ok(true)
        }
        Command::List { registry: None } => {
            write_json(out, &registry.names())?;
            Ok(true)
        }
        Command::List {
            registry: Some(name),
        } => {
            if !registry.has_registry(&name) {
                return Err(QuarryError::UnknownRegistry { registry: name });
            }
            write_json(out, &registry.item_names(&name))?;
            Ok(true)
        }
        Command::Call {
            registry: name,
            item,
            params,
        } => {
            let request: PluginRequest = params.into_iter().collect();
            let reply = registry.call_reply(&name, &item, &request);
            write_json(out, &reply)?;
            Ok(reply.status.ok())
        }
    }
}

fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> Result<(), QuarryError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` overrides `log_level`.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quarry={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
