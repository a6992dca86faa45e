//! Alert generation over claim runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use watchtower_core::{AlertConfig, Claim};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighConfidenceClaim,
    WellSupportedClaim,
    ConfidenceDrop,
    ConfidenceIncrease,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HighConfidenceClaim => "high_confidence_claim",
            AlertType::WellSupportedClaim => "well_supported_claim",
            AlertType::ConfidenceDrop => "confidence_drop",
            AlertType::ConfidenceIncrease => "confidence_increase",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notable event derived from a claim set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub details: Value,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    fn new(alert_type: AlertType, severity: Severity, message: String, details: Value) -> Self {
        Self {
            alert_type,
            severity,
            message,
            details,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_alerts: usize,
    /// Every severity is present, zero counts included
    pub severity_counts: BTreeMap<Severity, usize>,
    pub type_counts: BTreeMap<String, usize>,
    pub alerts: Vec<Alert>,
}

/// Derives alerts from the current claims and, optionally, a previous run
#[derive(Debug, Clone, Default)]
pub struct AlertGenerator {
    config: AlertConfig,
}

impl AlertGenerator {
    pub fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Evaluate every rule over `current`.
    ///
    /// Output is grouped by rule: high-confidence alerts first, then
    /// well-supported, then confidence movement against `previous`. Within a
    /// group alerts follow the order of `current`.
    pub fn generate(&self, current: &[Claim], previous: Option<&[Claim]>) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for claim in current {
            if claim.confidence() >= self.config.confidence_high_threshold {
                alerts.push(Alert::new(
                    AlertType::HighConfidenceClaim,
                    Severity::High,
                    format!("High-confidence claim detected: {}", self.preview(claim)),
                    json!({
                        "claim_id": claim.id(),
                        "confidence": claim.confidence(),
                        "statement": claim.statement(),
                    }),
                ));
            }
        }

        for claim in current {
            let total = claim.evidence_count();
            if total >= self.config.well_supported_min_refs {
                alerts.push(Alert::new(
                    AlertType::WellSupportedClaim,
                    Severity::Medium,
                    format!("Claim with substantial evidence: {}", self.preview(claim)),
                    json!({
                        "claim_id": claim.id(),
                        "total_evidence": total,
                        "supporting_count": claim.supporting_evidence_ids().len(),
                        "counter_count": claim.counter_evidence_ids().len(),
                    }),
                ));
            }
        }

        if let Some(previous) = previous {
            let prev_by_id: HashMap<&str, &Claim> = previous
                .iter()
                .filter_map(|c| c.id().map(|id| (id, c)))
                .collect();
            let threshold = self.config.confidence_drop_threshold;

            for claim in current {
                let Some(prev) = claim.id().and_then(|id| prev_by_id.get(id)) else {
                    continue;
                };
                let change = claim.confidence() - prev.confidence();
                let details = json!({
                    "claim_id": claim.id(),
                    "previous_confidence": prev.confidence(),
                    "current_confidence": claim.confidence(),
                    "change": change,
                });

                // Drop is checked first; a delta can fire at most one branch.
                if change <= -threshold {
                    alerts.push(Alert::new(
                        AlertType::ConfidenceDrop,
                        Severity::High,
                        format!("Significant confidence drop in claim: {}", self.preview(claim)),
                        details,
                    ));
                } else if change >= threshold {
                    alerts.push(Alert::new(
                        AlertType::ConfidenceIncrease,
                        Severity::Medium,
                        format!(
                            "Significant confidence increase in claim: {}",
                            self.preview(claim)
                        ),
                        details,
                    ));
                }
            }
        }

        if !alerts.is_empty() {
            tracing::debug!(count = alerts.len(), "Generated alerts");
        }
        alerts
    }

    pub fn summarize(&self, alerts: &[Alert]) -> AlertSummary {
        let mut severity_counts: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();

        for alert in alerts {
            *severity_counts.entry(alert.severity).or_insert(0) += 1;
            *type_counts
                .entry(alert.alert_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        AlertSummary {
            total_alerts: alerts.len(),
            severity_counts,
            type_counts,
            alerts: alerts.to_vec(),
        }
    }

    fn preview(&self, claim: &Claim) -> String {
        claim
            .statement()
            .chars()
            .take(self.config.message_preview_chars)
            .collect()
    }
}
