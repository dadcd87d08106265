// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `config.filesystem`: serves a JSON document read from local disk.

use std::path::{Path, PathBuf};

use quarry_core::{
    action, set_response, Plugin, PluginRequest, PluginResponse, QuarryError, RouteInfo,
};

use super::ConfigPlugin;

/// Action that returns the configuration document.
pub const GEN_CONFIG: &str = "genConfig";

/// Response key holding the packed document.
pub const DATA_KEY: &str = "data";

pub struct FilesystemConfigPlugin {
    path: PathBuf,
}

impl FilesystemConfigPlugin {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<serde_json::Value, QuarryError> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Plugin for FilesystemConfigPlugin {
    fn setup(&self) -> Result<(), QuarryError> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(QuarryError::SetupFailed(format!(
                "config file {} does not exist",
                self.path.display()
            )))
        }
    }

    fn route_info(&self) -> RouteInfo {
        RouteInfo::from([
            ("type".to_string(), "filesystem".to_string()),
            ("path".to_string(), self.path().display().to_string()),
        ])
    }

    fn call(&self, request: &PluginRequest) -> Result<PluginResponse, QuarryError> {
        match action(request) {
            Some(GEN_CONFIG) => {
                let document = self.read_document()?;
                let mut response = PluginResponse::new();
                set_response(DATA_KEY, &document, &mut response);
                Ok(response)
            }
            other => Err(QuarryError::Plugin(format!(
                "unsupported config action: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

impl ConfigPlugin for FilesystemConfigPlugin {}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{get_response, request};

    fn fixture(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quarry.conf");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn gen_config_packs_document() {
        let (_dir, path) = fixture(r#"{"schedule": {"uptime": {"interval": 60}}}"#);
        let plugin = FilesystemConfigPlugin::new(&path);
        plugin.setup().unwrap();

        let rows = plugin.call(&request([("action", GEN_CONFIG)])).unwrap();

        let data = get_response(DATA_KEY, &rows).unwrap();
        assert_eq!(data["schedule"]["uptime"]["interval"], 60);
    }

    #[test]
    fn missing_file_fails_setup() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = FilesystemConfigPlugin::new(dir.path().join("absent.conf"));
        let err = plugin.setup().unwrap_err();
        assert!(matches!(err, QuarryError::SetupFailed(_)));
    }

    #[test]
    fn malformed_document_is_an_error() {
        let (_dir, path) = fixture("{not json");
        let plugin = FilesystemConfigPlugin::new(&path);
        let err = plugin.call(&request([("action", GEN_CONFIG)])).unwrap_err();
        assert!(matches!(err, QuarryError::Serialization(_)));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let plugin = FilesystemConfigPlugin::new("/nonexistent");
        let err = plugin.call(&request([("action", "purge")])).unwrap_err();
        assert_eq!(err.to_string(), "plugin error: unsupported config action: purge");
    }

    #[test]
    fn route_info_names_the_path() {
        let plugin = FilesystemConfigPlugin::new("/etc/quarry/quarry.conf");
        let route = plugin.route_info();
        assert_eq!(route["type"], "filesystem");
        assert_eq!(route["path"], "/etc/quarry/quarry.conf");
    }
}
