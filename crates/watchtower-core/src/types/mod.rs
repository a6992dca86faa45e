pub mod filter;

use std::collections::BTreeMap;

pub use filter::{ArtifactFilter, ClaimFilter, EvidenceFilter};

/// Opaque record identifier assigned by a store
pub type RecordId = String;

/// Free-form key/value metadata owned by a single record
pub type Metadata = BTreeMap<String, serde_json::Value>;
