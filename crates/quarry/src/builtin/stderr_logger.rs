// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `logger.stderr`: forwards log requests to the process's tracing subscriber.

use quarry_core::{action, Plugin, PluginRequest, PluginResponse, QuarryError, RouteInfo};
use tracing::{error, info, warn};

use super::LoggerPlugin;

#[derive(Default)]
pub struct StderrLogger;

impl Plugin for StderrLogger {
    fn route_info(&self) -> RouteInfo {
        RouteInfo::from([("type".to_string(), "stderr".to_string())])
    }

    fn call(&self, request: &PluginRequest) -> Result<PluginResponse, QuarryError> {
        if action(request) != Some("log") {
            return Err(QuarryError::Plugin(format!(
                "unsupported logger action: {}",
                action(request).unwrap_or("<none>")
            )));
        }
        let message = request
            .get("message")
            .ok_or_else(|| QuarryError::Plugin("log request has no message".to_string()))?;

        // "error" and "warning" raise the level; anything else logs at info.
        match request.get("severity").map(String::as_str) {
            Some("error") => error!(plugin_message = %message, "plugin log"),
            Some("warning") => warn!(plugin_message = %message, "plugin log"),
            _ => info!(plugin_message = %message, "plugin log"),
        }
        Ok(PluginResponse::new())
    }
}

impl LoggerPlugin for StderrLogger {}
