// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-shaped value types shared by plugins, registries, and transports.
//!
//! These are plain maps and lists so they serialize without adaptation.
//! `BTreeMap` keeps output deterministic; key order is not part of the contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Conventional request key naming the operation a plugin should perform.
pub const ACTION_KEY: &str = "action";

/// Key/value metadata an item publishes about itself.
pub type RouteInfo = BTreeMap<String, String>;

/// Item name to that item's route metadata.
pub type RegistryRoutes = BTreeMap<String, RouteInfo>;

/// Registry name to its route table: everything currently invocable.
pub type RegistryBroadcast = BTreeMap<String, RegistryRoutes>;

/// The request half of a plugin call.
pub type PluginRequest = BTreeMap<String, String>;

/// The response half of a plugin call: zero or more result rows.
pub type PluginResponse = Vec<PluginRequest>;

/// The outcome of a call as it travels over a transport.
///
/// The status is carried alongside the response, never embedded in it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallReply {
    pub status: Status,
    pub response: PluginResponse,
}

impl<E> From<Result<PluginResponse, E>> for CallReply
where
    Status: From<E>,
{
    fn from(result: Result<PluginResponse, E>) -> Self {
        match result {
            Ok(response) => Self {
                status: Status::success(),
                response,
            },
            Err(err) => Self {
                status: Status::from(err),
                response: PluginResponse::new(),
            },
        }
    }
}

/// Build a request from key/value pairs.
pub fn request<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PluginRequest
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Read the conventional action of a request, if present.
pub fn action(request: &PluginRequest) -> Option<&str> {
    request.get(ACTION_KEY).map(String::as_str)
}
