// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single category registry: every item implementing one capability.
//!
//! Registration and setup are separate steps. `add` only constructs the
//! binding, so every item answers `route_info` immediately; `setup` runs later,
//! once the process is ready, and retires the items that fail it.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use quarry_core::{Plugin, PluginRequest, PluginResponse, QuarryError, RegistryRoutes};
use tracing::{debug, warn};

use crate::item::Item;
use crate::snapshot::{publish, Edit};

/// Item name to registry-owned item handle.
pub type ItemMap = BTreeMap<String, Arc<Item>>;

/// Registry of all items of one category, keyed by item name.
pub struct RegistryCore {
    name: String,
    item_type: &'static str,
    auto_setup: bool,
    items: ArcSwap<ItemMap>,
}

impl RegistryCore {
    /// Create an empty registry.
    ///
    /// `item_type` names the capability the items implement and is only used
    /// for diagnostics. A registry with `auto_setup == false` is lazy: its items
    /// are never set up by [`RegistryCore::setup`].
    pub fn new(name: &str, item_type: &'static str, auto_setup: bool) -> Self {
        Self {
            name: name.to_string(),
            item_type,
            auto_setup,
            items: ArcSwap::from_pointee(ItemMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_type(&self) -> &'static str {
        self.item_type
    }

    pub fn auto_setup(&self) -> bool {
        self.auto_setup
    }

    /// Bind `plugin` under `item_name`. No setup is performed.
    pub fn add<P: Plugin>(&self, item_name: &str, plugin: P) -> Result<(), QuarryError> {
        self.add_boxed(item_name, Box::new(plugin))
    }

    /// Bind an already boxed plugin under `item_name`.
    ///
    /// Fails with [`QuarryError::DuplicateItem`] if the name is taken; the
    /// existing binding is left as it was.
    pub fn add_boxed(&self, item_name: &str, plugin: Box<dyn Plugin>) -> Result<(), QuarryError> {
        let item = Arc::new(Item::new(&self.name, item_name, plugin));
        publish(&self.items, |items| {
            if items.contains_key(item_name) {
                return Edit::Keep(Err(QuarryError::DuplicateItem {
                    registry: self.name.clone(),
                    item: item_name.to_string(),
                }));
            }
            let mut next = items.clone();
            next.insert(item_name.to_string(), Arc::clone(&item));
            Edit::Publish(next, Ok(()))
        })?;
        debug!(registry = %self.name, item = item_name, "registered item");
        Ok(())
    }

    /// Look up an item the calling code knows to be registered.
    ///
    /// # Panics
    ///
    /// Panics if no item is bound to `item_name`. Names that come from
    /// outside the process must go through [`RegistryCore::find`] or
    /// [`RegistryCore::call`] instead.
    pub fn get(&self, item_name: &str) -> Arc<Item> {
        self.find(item_name)
            .unwrap_or_else(|| panic!("registry `{}` has no item `{item_name}`", self.name))
    }

    /// Look up an item by name.
    pub fn find(&self, item_name: &str) -> Option<Arc<Item>> {
        self.items.load().get(item_name).cloned()
    }

    /// Unbind `item_name` and tear the item down. Absent names are ignored.
    ///
    /// Handles already given out stay valid.
    pub fn remove(&self, item_name: &str) {
        self.unbind(item_name, |_| true);
    }

    /// Unbind `item_name` only while it is still bound to `expected`.
    ///
    /// Returns whether the binding was removed.
    fn remove_bound(&self, item_name: &str, expected: &Arc<Item>) -> bool {
        self.unbind(item_name, |bound| Arc::ptr_eq(bound, expected))
    }

    fn unbind(&self, item_name: &str, matches: impl Fn(&Arc<Item>) -> bool) -> bool {
        let removed = publish(&self.items, |items| match items.get(item_name) {
            Some(item) if matches(item) => {
                let item = Arc::clone(item);
                let mut next = items.clone();
                next.remove(item_name);
                Edit::Publish(next, Some(item))
            }
            _ => Edit::Keep(None),
        });
        match removed {
            Some(item) => {
                item.teardown();
                debug!(registry = %self.name, item = item_name, "removed item");
                true
            }
            None => false,
        }
    }

    /// Route metadata of every currently registered item.
    pub fn routes(&self) -> RegistryRoutes {
        self.items
            .load()
            .iter()
            .map(|(name, item)| (name.clone(), item.route_info()))
            .collect()
    }

    /// Invoke an item by name.
    ///
    /// Unknown names produce [`QuarryError::ItemNotFound`]; this is the entry
    /// point for externally supplied names.
    pub fn call(
        &self,
        item_name: &str,
        request: &PluginRequest,
    ) -> Result<PluginResponse, QuarryError> {
        let item = self.find(item_name).ok_or_else(|| QuarryError::ItemNotFound {
            registry: self.name.clone(),
            item: item_name.to_string(),
        })?;
        item.call(request)
    }

    /// Set up every item and remove the ones that fail.
    ///
    /// Lazy registries are left untouched. All items are evaluated against
    /// one snapshot before any removal happens. A failed item is only
    /// removed while its name is still bound to it, so a replacement bound
    /// in the meantime survives. Returns the names of the removed items.
    pub fn setup(&self) -> Vec<String> {
        if !self.auto_setup {
            debug!(registry = %self.name, "lazy registry, skipping setup");
            return Vec::new();
        }

        let snapshot = self.items.load_full();
        let failed: Vec<(&String, &Arc<Item>)> = snapshot
            .iter()
            .filter(|(name, item)| match item.setup() {
                Ok(()) => false,
                Err(err) => {
                    warn!(
                        registry = %self.name,
                        item = %name,
                        error = %err,
                        "item failed setup, removing"
                    );
                    true
                }
            })
            .collect();

        failed
            .into_iter()
            .filter(|(name, item)| self.remove_bound(name, item))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn exists(&self, item_name: &str) -> bool {
        self.items.load().contains_key(item_name)
    }

    /// Registered item names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.items.load().keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.items.load().len()
    }

    /// Snapshot of every binding at this moment.
    pub fn all(&self) -> Arc<ItemMap> {
        self.items.load_full()
    }
}

impl std::fmt::Debug for RegistryCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCore")
            .field("name", &self.name)
            .field("item_type", &self.item_type)
            .field("auto_setup", &self.auto_setup)
            .field("items", &self.names())
            .finish()
    }
}
