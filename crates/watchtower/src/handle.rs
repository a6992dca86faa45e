//! Unified Watchtower handle
//!
//! Bundles the three stores, the plugin registry and the alert generator
//! behind one entry point.

use crate::{
    AlertGenerator, Artifact, ArtifactStore, ArtifactType, CaseFile, Claim, ClaimFilter,
    ClaimStore, Evidence, EvidenceFilter, EvidenceStore, JsonExporter, ManualEntryPlugin,
    MemoryArtifactStore, MemoryClaimStore, MemoryEvidenceStore, NewArtifact, PluginConfig,
    PluginRegistry, Result, WatchtowerConfig,
};
use std::sync::Arc;
use watchtower_audit::Alert;

/// In-memory Watchtower instance
pub struct Watchtower {
    evidence: Arc<MemoryEvidenceStore>,
    claims: MemoryClaimStore,
    artifacts: MemoryArtifactStore,
    plugins: PluginRegistry,
    alerts: AlertGenerator,
    config: WatchtowerConfig,
}

impl Watchtower {
    /// Fresh instance with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(WatchtowerConfig::default())
    }

    /// Fresh instance; the registry starts with the manual-entry plugin
    pub fn with_config(config: WatchtowerConfig) -> Result<Self> {
        let evidence = Arc::new(MemoryEvidenceStore::new());
        let claims = MemoryClaimStore::new(evidence.clone());

        let mut plugins = PluginRegistry::new();
        plugins.register(Box::new(ManualEntryPlugin::new()))?;

        Ok(Self {
            evidence,
            claims,
            artifacts: MemoryArtifactStore::new(),
            plugins,
            alerts: AlertGenerator::new(config.alerts.clone()),
            config,
        })
    }

    pub fn evidence(&self) -> &Arc<MemoryEvidenceStore> {
        &self.evidence
    }

    pub fn claims(&self) -> &MemoryClaimStore {
        &self.claims
    }

    pub fn artifacts(&self) -> &MemoryArtifactStore {
        &self.artifacts
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Mutable registry access for registering additional plugins
    pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
        &mut self.plugins
    }

    pub fn alert_generator(&self) -> &AlertGenerator {
        &self.alerts
    }

    pub fn config(&self) -> &WatchtowerConfig {
        &self.config
    }

    /// Run a registered plugin and store what it extracts
    pub fn ingest(&self, plugin: &str, config: &PluginConfig) -> Result<Vec<Evidence>> {
        self.plugins.ingest(plugin, config, self.evidence.as_ref())
    }

    /// Alerts over every stored claim, optionally against a previous run
    pub fn alerts(&self, previous: Option<&[Claim]>) -> Result<Vec<Alert>> {
        let current = self.claims.list(&ClaimFilter::default())?;
        Ok(self.alerts.generate(&current, previous))
    }

    /// Gather every stored claim and evidence record into a case file
    pub fn snapshot_case(&self, title: impl Into<String>) -> Result<CaseFile> {
        let claims = self.claims.list(&ClaimFilter::default())?;
        let evidence = self.evidence.list(&EvidenceFilter::default())?;
        Ok(CaseFile::new(title)
            .with_claims(claims)
            .with_evidence(evidence))
    }

    /// Case file titled from the export configuration
    pub fn snapshot_default_case(&self) -> Result<CaseFile> {
        self.snapshot_case(self.config.export.title.clone())
    }

    /// Store the JSON rendering of `case` as a report artifact.
    ///
    /// Passing the previous report as `parent` chains report versions, so
    /// `artifacts().lineage(id)` returns the full history.
    pub fn archive_report(&self, case: &CaseFile, parent: Option<&str>) -> Result<Artifact> {
        let content = JsonExporter::new().export(case)?;
        let export = &self.config.export;

        let mut draft = NewArtifact::new(ArtifactType::Report, content)
            .with_metadata_entry("title", case.title.clone())
            .with_metadata_entry("total_claims", case.claims.len())
            .with_metadata_entry("total_evidence", case.evidence.len())
            .with_tool(export.tool_name.clone(), export.tool_version.clone());
        if let Some(parent) = parent {
            draft = draft.with_parent(parent);
        }

        let report = self.artifacts.store(draft)?;
        tracing::info!(
            id = report.id().unwrap_or_default(),
            parent = ?parent,
            "Archived case report"
        );
        Ok(report)
    }
}
