// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category registries and the capability catalog.
//!
//! Items implementing [`quarry_core::Plugin`] are added to a named category
//! registry ([`RegistryCore`]); the [`Registry`] catalog owns every category and
//! answers calls, setup, and broadcast requests across all of them.
//! [`Bootstrap`] drives the registration phase at startup.
//!
//! Both map levels are published copy-on-write, so reads never lock and
//! items may be added or removed after startup.

pub mod bootstrap;
pub mod catalog;
pub mod item;
pub mod registry_core;
mod snapshot;

pub use bootstrap::{item_key, Bootstrap};
pub use catalog::{Registry, RegistryMap};
pub use item::Item;
pub use registry_core::{ItemMap, RegistryCore};
