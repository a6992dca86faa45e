//! Source plugins
//!
//! A plugin turns some external source into evidence drafts. It never writes
//! to a store itself; [`PluginRegistry::ingest`] hands the drafts to an
//! [`EvidenceStore`](watchtower_core::EvidenceStore), which stays the only
//! write path for evidence.
//!
//! # Example
//!
//! ```no_run
//! use watchtower_core::{NewEvidence, Result};
//! use watchtower_plugins::{PluginConfig, PluginRegistry, SourcePlugin};
//!
//! struct HeadlinePlugin;
//!
//! impl SourcePlugin for HeadlinePlugin {
//!     fn name(&self) -> &str {
//!         "headline"
//!     }
//!
//!     fn version(&self) -> &str {
//!         "1.0.0"
//!     }
//!
//!     fn extract(&self, config: &PluginConfig) -> Result<Vec<NewEvidence>> {
//!         let text = config.get("headline").and_then(|v| v.as_str()).unwrap_or_default();
//!         Ok(vec![NewEvidence::new(text, "news")])
//!     }
//! }
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(Box::new(HeadlinePlugin))?;
//! # Ok::<(), watchtower_core::WatchtowerError>(())
//! ```

mod manual;
mod registry;

pub use manual::ManualEntryPlugin;
pub use registry::PluginRegistry;

use watchtower_core::{NewEvidence, Result};

/// Plugin configuration: a JSON object
pub type PluginConfig = serde_json::Map<String, serde_json::Value>;

/// A source of evidence drafts
pub trait SourcePlugin: Send + Sync {
    /// Unique registry key
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Cheap structural check run before `extract`
    fn validate_config(&self, _config: &PluginConfig) -> bool {
        true
    }

    /// Produce drafts from the configured source
    fn extract(&self, config: &PluginConfig) -> Result<Vec<NewEvidence>>;
}
