// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry-owned handle around a plugin instance.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use quarry_core::{Plugin, PluginRequest, PluginResponse, QuarryError, RouteInfo};

/// A plugin bound to a name inside one registry.
///
/// The name is assigned by the registry at add time; the plugin cannot change
/// it. Handles are shared through `Arc`, so a caller holding one keeps a
/// usable item even after the registry drops its own binding.
pub struct Item {
    name: String,
    registry: String,
    plugin: Box<dyn Plugin>,
    setup: OnceLock<Result<(), String>>,
    torn_down: AtomicBool,
}

impl Item {
    pub(crate) fn new(registry: &str, name: &str, plugin: Box<dyn Plugin>) -> Self {
        Self {
            name: name.to_string(),
            registry: registry.to_string(),
            plugin,
            setup: OnceLock::new(),
            torn_down: AtomicBool::new(false),
        }
    }

    /// The name this item is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registry this item was added to.
    pub fn registry(&self) -> &str {
        &self.registry
    }

    pub fn plugin(&self) -> &dyn Plugin {
        &*self.plugin
    }

    /// Borrow the plugin as its concrete type, if it is a `P`.
    pub fn downcast_ref<P: Plugin>(&self) -> Option<&P> {
        let plugin: &dyn Plugin = &*self.plugin;
        let any: &dyn Any = plugin;
        any.downcast_ref::<P>()
    }

    /// Run the plugin's setup. Only the first invocation reaches the plugin;
    /// later ones replay the recorded outcome.
    pub fn setup(&self) -> Result<(), QuarryError> {
        let mut first_error = None;
        let outcome = self.setup.get_or_init(|| {
            self.plugin.setup().map_err(|err| {
                let message = err.to_string();
                first_error = Some(err);
                message
            })
        });
        match (outcome, first_error) {
            (Ok(()), _) => Ok(()),
            (Err(_), Some(err)) => Err(err),
            (Err(message), None) => Err(QuarryError::SetupFailed(message.clone())),
        }
    }

    /// Whether setup has run and succeeded.
    pub fn is_set_up(&self) -> bool {
        matches!(self.setup.get(), Some(Ok(())))
    }

    /// Tear the plugin down unless that already happened.
    pub(crate) fn teardown(&self) {
        if !self.torn_down.swap(true, Ordering::AcqRel) {
            self.plugin.teardown();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    pub fn route_info(&self) -> RouteInfo {
        self.plugin.route_info()
    }

    pub fn call(&self, request: &PluginRequest) -> Result<PluginResponse, QuarryError> {
        self.plugin.call(request)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("registry", &self.registry)
            .field("set_up", &self.is_set_up())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}
