// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit registration phase.
//!
//! Registries and items are declared by calling [`Bootstrap`] methods in a
//! fixed order during startup, before any capability is invoked. Rejected
//! registrations are logged and collected rather than aborting the phase.

use std::collections::HashSet;

use quarry_core::{Plugin, QuarryError};
use tracing::{debug, warn};

use crate::catalog::Registry;

/// Key used to disable an item: `"<registry>.<item>"`.
pub fn item_key(registry: &str, item: &str) -> String {
    format!("{registry}.{item}")
}

/// Builder-style registration against a catalog.
pub struct Bootstrap<'a> {
    registry: &'a Registry,
    disabled: HashSet<String>,
    rejected: Vec<QuarryError>,
}

impl<'a> Bootstrap<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            disabled: HashSet::new(),
            rejected: Vec::new(),
        }
    }

    /// Skip the given `"<registry>.<item>"` keys when registering.
    pub fn disable<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn is_disabled(&self, registry: &str, item: &str) -> bool {
        self.disabled.contains(&item_key(registry, item))
    }

    /// Declare a registry whose items are set up automatically.
    pub fn create_registry<T: ?Sized + 'static>(&mut self, name: &str) -> &mut Self {
        self.registry.create::<T>(name, true);
        self
    }

    /// Declare a registry whose items are never set up automatically.
    pub fn create_lazy_registry<T: ?Sized + 'static>(&mut self, name: &str) -> &mut Self {
        self.registry.create_lazy::<T>(name);
        self
    }

    /// Construct a fresh `P` and register it.
    pub fn register<P: Plugin + Default>(&mut self, registry: &str, item: &str) -> &mut Self {
        if self.skip(registry, item) {
            return self;
        }
        self.insert(registry, item, Box::new(P::default()))
    }

    /// Register an already constructed plugin.
    pub fn register_with<P: Plugin>(&mut self, registry: &str, item: &str, plugin: P) -> &mut Self {
        if self.skip(registry, item) {
            return self;
        }
        self.insert(registry, item, Box::new(plugin))
    }

    /// Register a plugin that is already boxed.
    pub fn register_boxed(
        &mut self,
        registry: &str,
        item: &str,
        plugin: Box<dyn Plugin>,
    ) -> &mut Self {
        if self.skip(registry, item) {
            return self;
        }
        self.insert(registry, item, plugin)
    }

    /// End the registration phase, returning every rejected registration.
    pub fn finish(self) -> Vec<QuarryError> {
        self.rejected
    }

    fn skip(&self, registry: &str, item: &str) -> bool {
        let disabled = self.is_disabled(registry, item);
        if disabled {
            debug!(registry, item, "item disabled by configuration");
        }
        disabled
    }

    fn insert(&mut self, registry: &str, item: &str, plugin: Box<dyn Plugin>) -> &mut Self {
        if let Err(err) = self.registry.add_boxed(registry, item, plugin) {
            warn!(registry, item, error = %err, "registration rejected");
            self.rejected.push(err);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Nop;

    impl Plugin for Nop {}

    #[test]
    fn registers_in_declared_order() {
        let catalog = Registry::new();
        let mut boot = Bootstrap::new(&catalog);
        boot.create_registry::<dyn Plugin>("config")
            .create_lazy_registry::<dyn Plugin>("table")
            .register::<Nop>("config", "filesystem")
            .register_with("table", "platform", Nop);
        assert!(boot.finish().is_empty());

        assert!(catalog.exists("config", "filesystem"));
        assert!(catalog.exists("table", "platform"));
        assert!(!catalog.registry("table").auto_setup());
    }

    #[test]
    fn disabled_items_are_skipped() {
        let catalog = Registry::new();
        let mut boot = Bootstrap::new(&catalog).disable(["config.http"]);
        boot.create_registry::<dyn Plugin>("config")
            .register::<Nop>("config", "http")
            .register::<Nop>("config", "filesystem");
        assert!(boot.finish().is_empty());

        assert_eq!(catalog.item_names("config"), vec!["filesystem".to_string()]);
    }

    #[test]
    fn rejected_registrations_are_collected() {
        let catalog = Registry::new();
        let mut boot = Bootstrap::new(&catalog);
        boot.create_registry::<dyn Plugin>("config")
            .register::<Nop>("config", "filesystem")
            .register::<Nop>("config", "filesystem")
            .register::<Nop>("logger", "stderr");
        let rejected = boot.finish();

        assert_eq!(rejected.len(), 2);
        assert!(matches!(rejected[0], QuarryError::DuplicateItem { .. }));
        assert!(matches!(rejected[1], QuarryError::UnknownRegistry { .. }));
        assert_eq!(catalog.count_items("config"), 1);
    }

    #[test]
    fn item_key_joins_with_dot() {
        assert_eq!(item_key("config", "http"), "config.http");
    }
}
