// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `table.platform`: one row describing the build target.

use std::env::consts;

use quarry_core::{action, request, Plugin, PluginRequest, PluginResponse, QuarryError, RouteInfo};

use super::TablePlugin;

/// Column names, in output order.
pub const COLUMNS: [&str; 3] = ["os", "arch", "family"];

#[derive(Default)]
pub struct PlatformTable;

impl Plugin for PlatformTable {
    fn route_info(&self) -> RouteInfo {
        RouteInfo::from([
            ("type".to_string(), "table".to_string()),
            ("columns".to_string(), COLUMNS.join(",")),
        ])
    }

    fn call(&self, req: &PluginRequest) -> Result<PluginResponse, QuarryError> {
        match action(req) {
            Some("generate") => Ok(vec![request([
                ("os", consts::OS),
                ("arch", consts::ARCH),
                ("family", consts::FAMILY),
            ])]),
            other => Err(QuarryError::Plugin(format!(
                "unsupported table action: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

impl TablePlugin for PlatformTable {}
