use crate::{PluginConfig, SourcePlugin};
use std::collections::HashMap;
use watchtower_core::{Evidence, EvidenceStore, Result, WatchtowerError};

/// Name-keyed collection of source plugins
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Box<dyn SourcePlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. An existing name is never overwritten.
    pub fn register(&mut self, plugin: Box<dyn SourcePlugin>) -> Result<()> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(WatchtowerError::DuplicateName(name));
        }
        tracing::info!(plugin = %name, version = plugin.version(), "Registered plugin");
        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Remove a plugin by name, returning it if it was registered
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn SourcePlugin>> {
        let removed = self.plugins.remove(name);
        if removed.is_some() {
            tracing::info!(plugin = name, "Unregistered plugin");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&dyn SourcePlugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registered plugins, sorted by name
    pub fn plugins(&self) -> Vec<&dyn SourcePlugin> {
        let mut plugins: Vec<&dyn SourcePlugin> =
            self.plugins.values().map(|p| p.as_ref()).collect();
        plugins.sort_by(|a, b| a.name().cmp(b.name()));
        plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run a plugin and store every draft it yields.
    ///
    /// Drafts without tool provenance are stamped with the plugin's name and
    /// version. Returns the stored records in extraction order.
    pub fn ingest(
        &self,
        name: &str,
        config: &PluginConfig,
        store: &dyn EvidenceStore,
    ) -> Result<Vec<Evidence>> {
        let plugin = self
            .get(name)
            .ok_or_else(|| WatchtowerError::PluginNotFound(name.to_string()))?;

        if !plugin.validate_config(config) {
            tracing::warn!(plugin = name, "Rejected plugin configuration");
            return Err(WatchtowerError::InvalidConfig(format!(
                "configuration rejected by plugin '{}'",
                name
            )));
        }

        let drafts = plugin.extract(config)?;
        let mut stored = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let draft = if draft.provenance().tool_name.is_none() {
                draft.with_tool(plugin.name(), plugin.version())
            } else {
                draft
            };
            stored.push(store.store(draft)?);
        }

        tracing::info!(plugin = name, count = stored.len(), "Ingested evidence");
        Ok(stored)
    }
}
