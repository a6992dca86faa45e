use serde::{Deserialize, Serialize};

/// Thresholds used by the alert generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Minimum confidence drop between runs that raises `confidence_drop`
    /// (and the minimum rise that raises `confidence_increase`)
    /// Default: 0.2
    #[serde(default = "default_confidence_drop_threshold")]
    pub confidence_drop_threshold: f64,

    /// Confidence at or above which a claim raises `high_confidence_claim`
    /// Default: 0.9
    #[serde(default = "default_confidence_high_threshold")]
    pub confidence_high_threshold: f64,

    /// Total evidence references at or above which a claim is well supported
    /// Default: 5
    #[serde(default = "default_well_supported_min_refs")]
    pub well_supported_min_refs: usize,

    /// Characters of the statement quoted in alert messages
    /// Default: 100
    #[serde(default = "default_message_preview_chars")]
    pub message_preview_chars: usize,
}

fn default_confidence_drop_threshold() -> f64 {
    0.2
}

fn default_confidence_high_threshold() -> f64 {
    0.9
}

fn default_well_supported_min_refs() -> usize {
    5
}

fn default_message_preview_chars() -> usize {
    100
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            confidence_drop_threshold: default_confidence_drop_threshold(),
            confidence_high_threshold: default_confidence_high_threshold(),
            well_supported_min_refs: default_well_supported_min_refs(),
            message_preview_chars: default_message_preview_chars(),
        }
    }
}

impl AlertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_confidence_drop_threshold(mut self, threshold: f64) -> Self {
        self.confidence_drop_threshold = threshold;
        self
    }

    pub fn with_confidence_high_threshold(mut self, threshold: f64) -> Self {
        self.confidence_high_threshold = threshold;
        self
    }

    pub fn with_well_supported_min_refs(mut self, min_refs: usize) -> Self {
        self.well_supported_min_refs = min_refs;
        self
    }

    pub fn with_message_preview_chars(mut self, chars: usize) -> Self {
        self.message_preview_chars = chars;
        self
    }
}
