// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The catalog: every category registry in the process, keyed by name.
//!
//! A [`Registry`] is built once during bootstrap and shared (usually as
//! `Arc<Registry>`) with the components that need it. Lookups by names the
//! caller controls (`get`, `registry`) panic when the name is unknown, since
//! that is a wiring mistake. Everything that may receive an externally
//! supplied name (`call`, `exists`, `item_names`, `count_items`, `routes`)
//! answers with a definite value or an error instead.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use quarry_core::{
    CallReply, Plugin, PluginRequest, PluginResponse, QuarryError, RegistryBroadcast,
    RegistryRoutes,
};
use tracing::{debug, info};

use crate::item::Item;
use crate::registry_core::RegistryCore;
use crate::snapshot::{publish, Edit};

/// Registry name to category registry.
pub type RegistryMap = BTreeMap<String, Arc<RegistryCore>>;

/// The registry of registries.
pub struct Registry {
    registries: ArcSwap<RegistryMap>,
}

impl Registry {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            registries: ArcSwap::from_pointee(RegistryMap::new()),
        }
    }

    /// Create the registry `name` whose items implement `T`.
    ///
    /// Idempotent: if `name` already exists the existing registry is returned
    /// untouched, items and `auto_setup` flag included.
    pub fn create<T: ?Sized + 'static>(&self, name: &str, auto_setup: bool) -> Arc<RegistryCore> {
        let created = Arc::new(RegistryCore::new(
            name,
            std::any::type_name::<T>(),
            auto_setup,
        ));
        let (registry, fresh) = publish(&self.registries, |registries| {
            if let Some(existing) = registries.get(name) {
                return Edit::Keep((Arc::clone(existing), false));
            }
            let mut next = registries.clone();
            next.insert(name.to_string(), Arc::clone(&created));
            Edit::Publish(next, (Arc::clone(&created), true))
        });
        if fresh {
            debug!(
                registry = name,
                item_type = registry.item_type(),
                auto_setup,
                "created registry"
            );
        }
        registry
    }

    /// Create a registry whose items are never set up automatically.
    pub fn create_lazy<T: ?Sized + 'static>(&self, name: &str) -> Arc<RegistryCore> {
        self.create::<T>(name, false)
    }

    /// Look up a registry the calling code knows to exist.
    ///
    /// # Panics
    ///
    /// Panics if `name` was never created.
    pub fn registry(&self, name: &str) -> Arc<RegistryCore> {
        self.find_registry(name)
            .unwrap_or_else(|| panic!("registry `{name}` was never created"))
    }

    pub fn find_registry(&self, name: &str) -> Option<Arc<RegistryCore>> {
        self.registries.load().get(name).cloned()
    }

    /// Add `plugin` to `registry` under `item`.
    pub fn add<P: Plugin>(&self, registry: &str, item: &str, plugin: P) -> Result<(), QuarryError> {
        self.add_boxed(registry, item, Box::new(plugin))
    }

    /// Add an already boxed plugin to `registry` under `item`.
    pub fn add_boxed(
        &self,
        registry: &str,
        item: &str,
        plugin: Box<dyn Plugin>,
    ) -> Result<(), QuarryError> {
        let target = self
            .find_registry(registry)
            .ok_or_else(|| QuarryError::UnknownRegistry {
                registry: registry.to_string(),
            })?;
        target.add_boxed(item, plugin)
    }

    /// Look up an item the calling code knows to be registered.
    ///
    /// # Panics
    ///
    /// Panics if the registry or the item does not exist.
    pub fn get(&self, registry: &str, item: &str) -> Arc<Item> {
        self.registry(registry).get(item)
    }

    pub fn find(&self, registry: &str, item: &str) -> Option<Arc<Item>> {
        self.find_registry(registry)?.find(item)
    }

    /// Look up an item only if its plugin is a `P`.
    ///
    /// Pair with [`Item::downcast_ref`] to reach category-specific methods.
    pub fn get_as<P: Plugin>(&self, registry: &str, item: &str) -> Option<Arc<Item>> {
        self.find(registry, item)
            .filter(|found| found.downcast_ref::<P>().is_some())
    }

    /// Remove an item; unknown registries and items are ignored.
    pub fn remove(&self, registry: &str, item: &str) {
        if let Some(target) = self.find_registry(registry) {
            target.remove(item);
        }
    }

    /// Invoke `item` in `registry`.
    ///
    /// Unknown registries produce [`QuarryError::RegistryNotFound`], unknown
    /// items [`QuarryError::ItemNotFound`]. Never panics on names.
    pub fn call(
        &self,
        registry: &str,
        item: &str,
        request: &PluginRequest,
    ) -> Result<PluginResponse, QuarryError> {
        let target = self
            .find_registry(registry)
            .ok_or_else(|| QuarryError::RegistryNotFound {
                registry: registry.to_string(),
                item: item.to_string(),
            })?;
        target.call(item, request)
    }

    /// Invoke `item` and discard the response rows.
    pub fn notify(
        &self,
        registry: &str,
        item: &str,
        request: &PluginRequest,
    ) -> Result<(), QuarryError> {
        self.call(registry, item, request).map(|_| ())
    }

    /// Invoke `item` and package the outcome for a transport.
    pub fn call_reply(&self, registry: &str, item: &str, request: &PluginRequest) -> CallReply {
        CallReply::from(self.call(registry, item, request))
    }

    /// Run setup on every registry. Items that fail are pruned and logged;
    /// nothing is reported back. Registry order is unspecified.
    pub fn setup(&self) {
        let registries = self.registries.load_full();
        let mut pruned = 0;
        for registry in registries.values() {
            pruned += registry.setup().len();
        }
        let remaining: usize = registries.values().map(|r| r.count()).sum();
        info!(
            registries = registries.len(),
            items = remaining,
            pruned,
            "registry setup complete"
        );
    }

    /// Route tables of every registry, including empty ones.
    pub fn broadcast(&self) -> RegistryBroadcast {
        self.registries
            .load()
            .iter()
            .map(|(name, registry)| (name.clone(), registry.routes()))
            .collect()
    }

    /// Route table of one registry; empty for unknown names.
    pub fn routes(&self, registry: &str) -> RegistryRoutes {
        self.find_registry(registry)
            .map(|r| r.routes())
            .unwrap_or_default()
    }

    pub fn exists(&self, registry: &str, item: &str) -> bool {
        self.find_registry(registry)
            .is_some_and(|r| r.exists(item))
    }

    pub fn has_registry(&self, registry: &str) -> bool {
        self.registries.load().contains_key(registry)
    }

    /// Registry names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.registries.load().keys().cloned().collect()
    }

    /// Item names of one registry; empty for unknown names.
    pub fn item_names(&self, registry: &str) -> Vec<String> {
        self.find_registry(registry)
            .map(|r| r.names())
            .unwrap_or_default()
    }

    /// Number of registries.
    pub fn count(&self) -> usize {
        self.registries.load().len()
    }

    /// Number of items in one registry; zero for unknown names.
    pub fn count_items(&self, registry: &str) -> usize {
        self.find_registry(registry).map_or(0, |r| r.count())
    }

    /// Snapshot of every registry at this moment.
    pub fn all(&self) -> Arc<RegistryMap> {
        self.registries.load_full()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("registries", &self.names())
            .finish()
    }
}
