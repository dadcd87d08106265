// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Quarry capability registry.
//!
//! This crate provides the capability interface every registry item
//! implements, the wire-shaped request/response/broadcast types, the
//! result signal, and the shared error type.

pub mod error;
pub mod status;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::QuarryError;
pub use status::Status;
pub use traits::{get_response, set_response, Plugin};
pub use types::{
    action, request, CallReply, PluginRequest, PluginResponse, RegistryBroadcast, RegistryRoutes,
    RouteInfo, ACTION_KEY,
};
