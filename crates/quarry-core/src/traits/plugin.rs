// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability interface every registry item implements.

use std::any::Any;

use crate::error::QuarryError;
use crate::types::{PluginRequest, PluginResponse, RouteInfo};

/// The base trait for all Quarry registry items.
///
/// Construction must stay cheap and side-effect free: items may be built
/// before logging or configuration is ready. Anything that touches the
/// outside world belongs in [`Plugin::setup`], which the registry runs later.
///
/// All methods take `&self`; items that need mutable state use interior
/// mutability since the registry shares them behind `Arc`.
pub trait Plugin: Any + Send + Sync {
    /// Perform initialization once the process has finished bootstrapping.
    ///
    /// An error causes the registry to retire the item.
    fn setup(&self) -> Result<(), QuarryError> {
        Ok(())
    }

    /// Release resources when the item is removed from its registry.
    fn teardown(&self) {}

    /// Route metadata published in the registry broadcast.
    fn route_info(&self) -> RouteInfo {
        RouteInfo::new()
    }

    /// Act on a request. Items that do not override this expose no operations.
    fn call(&self, _request: &PluginRequest) -> Result<PluginResponse, QuarryError> {
        Err(QuarryError::NotImplemented)
    }
}

/// Pack a JSON document into `response` as a single row under `key`.
pub fn set_response(key: &str, tree: &serde_json::Value, response: &mut PluginResponse) {
    let mut row = PluginRequest::new();
    row.insert(key.to_string(), tree.to_string());
    response.push(row);
}

/// Unpack the JSON document stored under `key` in the first row that has it.
pub fn get_response(key: &str, response: &PluginResponse) -> Result<serde_json::Value, QuarryError> {
    let packed = response
        .iter()
        .find_map(|row| row.get(key))
        .ok_or_else(|| QuarryError::MissingResponseKey {
            key: key.to_string(),
        })?;
    Ok(serde_json::from_str(packed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Bare;

    impl Plugin for Bare {}

    #[test]
    fn defaults_are_inert() {
        let plugin = Bare;
        assert!(plugin.setup().is_ok());
        assert!(plugin.route_info().is_empty());
        plugin.teardown();
    }

    #[test]
    fn default_call_is_not_implemented() {
        let result = Bare.call(&PluginRequest::new());
        assert!(matches!(result, Err(QuarryError::NotImplemented)));
    }

    #[test]
    fn packed_tree_unpacks_to_the_same_document() {
        let tree = json!({
            "schedule": {"uptime": {"query": "select * from uptime", "interval": 10}},
            "packs": ["a", "b"],
        });
        let mut response = PluginResponse::new();
        set_response("data", &tree, &mut response);

        assert_eq!(response.len(), 1);
        assert_eq!(get_response("data", &response).unwrap(), tree);
    }

    #[test]
    fn get_response_searches_past_unrelated_rows() {
        let mut response = vec![PluginRequest::from([("other".into(), "x".into())])];
        set_response("data", &json!([1, 2, 3]), &mut response);
        assert_eq!(get_response("data", &response).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn get_response_missing_key() {
        let err = get_response("data", &PluginResponse::new()).unwrap_err();
        assert!(matches!(err, QuarryError::MissingResponseKey { ref key } if key == "data"));
    }

    #[test]
    fn get_response_rejects_malformed_json() {
        let response = vec![PluginRequest::from([("data".into(), "{not json".into())])];
        assert!(matches!(
            get_response("data", &response),
            Err(QuarryError::Serialization(_))
        ));
    }
}
