use serde::{Deserialize, Serialize};

/// Tool and model that produced a record
///
/// Both halves are optional. When a name is present the pair is rendered as
/// `name:version` inside fingerprints; a missing version renders empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(default)]
    pub tool_name: Option<String>,

    #[serde(default)]
    pub tool_version: Option<String>,

    #[serde(default)]
    pub model_name: Option<String>,

    #[serde(default)]
    pub model_version: Option<String>,
}

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.tool_name = Some(name.into());
        self.tool_version = Some(version.into());
        self
    }

    pub fn with_model(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self.model_version = Some(version.into());
        self
    }

    /// `tool_name:tool_version`, or `None` when no tool is recorded
    pub fn tool_tag(&self) -> Option<String> {
        tag(&self.tool_name, &self.tool_version)
    }

    /// `model_name:model_version`, or `None` when no model is recorded
    pub fn model_tag(&self) -> Option<String> {
        tag(&self.model_name, &self.model_version)
    }
}

fn tag(name: &Option<String>, version: &Option<String>) -> Option<String> {
    name.as_ref()
        .map(|n| format!("{}:{}", n, version.as_deref().unwrap_or("")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        let p = Provenance::new().with_tool("watchtower", "0.1.0");
        assert_eq!(p.tool_tag().as_deref(), Some("watchtower:0.1.0"));
        assert_eq!(p.model_tag(), None);

        let unversioned = Provenance {
            model_name: Some("gpt".into()),
            ..Default::default()
        };
        assert_eq!(unversioned.model_tag().as_deref(), Some("gpt:"));
    }
}
