use super::alerts::AlertConfig;
use crate::error::{Result, WatchtowerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults applied to exported case files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Title used when a case is snapshotted without one
    /// Default: "Watchtower Case File"
    #[serde(default = "default_title")]
    pub title: String,

    /// Tool provenance stamped on archived report artifacts
    #[serde(default = "default_tool_name")]
    pub tool_name: String,

    #[serde(default = "default_tool_version")]
    pub tool_version: String,
}

fn default_title() -> String {
    "Watchtower Case File".to_string()
}

fn default_tool_name() -> String {
    "watchtower".to_string()
}

fn default_tool_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tool_name: default_tool_name(),
            tool_version: default_tool_version(),
        }
    }
}

impl ExportConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self.tool_version = version.into();
        self
    }
}

/// Top-level configuration for a `Watchtower` handle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchtowerConfig {
    #[serde(default)]
    pub alerts: AlertConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl WatchtowerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alerts(mut self, alerts: AlertConfig) -> Self {
        self.alerts = alerts;
        self
    }

    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Load from a JSON file; missing sections fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            WatchtowerError::Config(format!("{}: {}", path.display(), e))
        })
    }
}
