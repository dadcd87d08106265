// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Quarry integration tests.
//!
//! Provides mock plugins and a harness that assembles a populated catalog
//! for fast, deterministic tests.
//!
//! # Components
//!
//! - [`MockPlugin`] - Plugin with scripted setup outcome, routes, and rows
//! - [`TestHarness`] - Catalog pre-declared with `config`, `logger`, and `table` registries

pub mod harness;
pub mod mock_plugin;

pub use harness::TestHarness;
pub use mock_plugin::{MockPlugin, MockProbe};
