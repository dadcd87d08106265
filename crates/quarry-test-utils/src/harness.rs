// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for catalog-level integration testing.
//!
//! `TestHarness` declares the standard registries (`config` and `logger`
//! with auto-setup, `table` lazy) through [`Bootstrap`], then registers the
//! mock items the test asks for.

use std::sync::Arc;

use quarry_core::{Plugin, QuarryError};
use quarry_registry::{Bootstrap, Registry};

/// Registries every harness declares, with their auto-setup flag.
pub const STANDARD_REGISTRIES: [(&str, bool); 3] =
    [("config", true), ("logger", true), ("table", false)];

type Registration = (String, String, Box<dyn Plugin>);

/// Builder for a populated catalog.
pub struct TestHarnessBuilder {
    registries: Vec<(String, bool)>,
    items: Vec<Registration>,
    disabled: Vec<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            registries: STANDARD_REGISTRIES
                .iter()
                .map(|(name, auto)| (name.to_string(), *auto))
                .collect(),
            items: Vec::new(),
            disabled: Vec::new(),
        }
    }

    /// Declare an additional registry.
    pub fn with_registry(mut self, name: &str, auto_setup: bool) -> Self {
        self.registries.push((name.to_string(), auto_setup));
        self
    }

    /// Register `plugin` as `item` in `registry`.
    pub fn with_item<P: Plugin>(mut self, registry: &str, item: &str, plugin: P) -> Self {
        self.items
            .push((registry.to_string(), item.to_string(), Box::new(plugin)));
        self
    }

    /// Disable a `"<registry>.<item>"` key.
    pub fn with_disabled(mut self, key: &str) -> Self {
        self.disabled.push(key.to_string());
        self
    }

    /// Run the registration phase. Fails on the first rejected registration.
    pub fn build(self) -> Result<TestHarness, QuarryError> {
        let registry = Arc::new(Registry::new());
        let mut boot = Bootstrap::new(&registry).disable(self.disabled);
        for (name, auto_setup) in &self.registries {
            if *auto_setup {
                boot.create_registry::<dyn Plugin>(name);
            } else {
                boot.create_lazy_registry::<dyn Plugin>(name);
            }
        }
        for (registry_name, item, plugin) in self.items {
            boot.register_boxed(&registry_name, &item, plugin);
        }
        if let Some(err) = boot.finish().into_iter().next() {
            return Err(err);
        }
        Ok(TestHarness { registry })
    }
}

/// A catalog assembled for a test.
pub struct TestHarness {
    pub registry: Arc<Registry>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run catalog setup and hand back the harness for chaining.
    pub fn setup(self) -> Self {
        self.registry.setup();
        self
    }
}
