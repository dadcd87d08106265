// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions.

pub mod plugin;

pub use plugin::{get_response, set_response, Plugin};
