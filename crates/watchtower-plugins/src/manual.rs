use crate::{PluginConfig, SourcePlugin};
use serde_json::Value;
use watchtower_core::{Metadata, NewEvidence, Result, WatchtowerError};

/// Evidence typed in by an analyst
///
/// Config keys: `content` (string, required), `metadata` (object, optional).
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualEntryPlugin;

impl ManualEntryPlugin {
    pub const NAME: &'static str = "manual_entry";
    pub const SOURCE: &'static str = "manual";

    pub fn new() -> Self {
        Self
    }
}

impl SourcePlugin for ManualEntryPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn description(&self) -> &str {
        "Manual evidence entry plugin"
    }

    fn validate_config(&self, config: &PluginConfig) -> bool {
        matches!(config.get("content"), Some(Value::String(_)))
    }

    fn extract(&self, config: &PluginConfig) -> Result<Vec<NewEvidence>> {
        let content = config
            .get("content")
            .and_then(Value::as_str)
            .ok_or_else(|| WatchtowerError::InvalidConfig("'content' must be a string".into()))?;

        let metadata: Metadata = match config.get("metadata") {
            Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            _ => Metadata::new(),
        };

        Ok(vec![NewEvidence::new(content, Self::SOURCE).with_metadata(metadata)])
    }
}
