// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin for deterministic testing.
//!
//! `MockPlugin` implements `Plugin` with a scripted setup outcome, route
//! metadata, and response rows. A [`MockProbe`] taken before the plugin is
//! moved into a registry keeps observing its setup, teardown, and calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use quarry_core::{Plugin, PluginRequest, PluginResponse, QuarryError, RouteInfo};

#[derive(Default)]
struct Counters {
    setups: AtomicUsize,
    teardowns: AtomicUsize,
    calls: Mutex<Vec<PluginRequest>>,
}

/// A plugin whose behavior is fixed at construction.
#[derive(Default)]
pub struct MockPlugin {
    setup_error: Option<String>,
    route: RouteInfo,
    rows: PluginResponse,
    call_error: Option<String>,
    counters: Arc<Counters>,
}

impl MockPlugin {
    /// A plugin that sets up fine, has no routes, and answers with no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `setup` fail with `message`.
    pub fn failing_setup(mut self, message: &str) -> Self {
        self.setup_error = Some(message.to_string());
        self
    }

    /// Make `call` fail with `message`.
    pub fn failing_call(mut self, message: &str) -> Self {
        self.call_error = Some(message.to_string());
        self
    }

    /// Add a route metadata entry.
    pub fn with_route(mut self, key: &str, value: &str) -> Self {
        self.route.insert(key.to_string(), value.to_string());
        self
    }

    /// Rows returned by every successful call.
    pub fn with_rows(mut self, rows: PluginResponse) -> Self {
        self.rows = rows;
        self
    }

    /// Observe this plugin after it has been handed to a registry.
    pub fn probe(&self) -> MockProbe {
        MockProbe {
            counters: Arc::clone(&self.counters),
        }
    }
}

impl Plugin for MockPlugin {
    fn setup(&self) -> Result<(), QuarryError> {
        self.counters.setups.fetch_add(1, Ordering::SeqCst);
        match &self.setup_error {
            Some(message) => Err(QuarryError::SetupFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn teardown(&self) {
        self.counters.teardowns.fetch_add(1, Ordering::SeqCst);
    }

    fn route_info(&self) -> RouteInfo {
        self.route.clone()
    }

    fn call(&self, request: &PluginRequest) -> Result<PluginResponse, QuarryError> {
        self.counters
            .calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        match &self.call_error {
            Some(message) => Err(QuarryError::Plugin(message.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}

/// Shared view of a [`MockPlugin`]'s activity.
#[derive(Clone)]
pub struct MockProbe {
    counters: Arc<Counters>,
}

impl MockProbe {
    pub fn setups(&self) -> usize {
        self.counters.setups.load(Ordering::SeqCst)
    }

    pub fn teardowns(&self) -> usize {
        self.counters.teardowns.load(Ordering::SeqCst)
    }

    /// Every request the plugin received, in order.
    pub fn calls(&self) -> Vec<PluginRequest> {
        self.counters
            .calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
