use crate::CaseFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use watchtower_core::{hash, Claim, Evidence, Metadata, NewClaim, NewEvidence, Provenance, Result};

#[derive(Debug, Serialize, Deserialize)]
struct CaseDocument {
    title: String,
    generated_at: String,
    #[serde(default)]
    metadata: Metadata,
    summary: CaseSummary,
    claims: Vec<ClaimEntry>,
    evidence: Vec<EvidenceEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CaseSummary {
    total_claims: usize,
    total_evidence: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct Component {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClaimEntry {
    id: Option<String>,
    statement: String,
    confidence: f64,
    supporting_evidence_ids: Vec<String>,
    counter_evidence_ids: Vec<String>,
    run_fingerprint: String,
    #[serde(default)]
    metadata: Metadata,
    tool: Option<Component>,
    model: Option<Component>,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EvidenceEntry {
    id: Option<String>,
    content: String,
    source: String,
    sha256: String,
    fingerprint: String,
    #[serde(default)]
    metadata: Metadata,
    tool: Option<Component>,
    model: Option<Component>,
    timestamp: DateTime<Utc>,
}

fn components(p: &Provenance) -> (Option<Component>, Option<Component>) {
    let tool = p.tool_name.as_ref().map(|name| Component {
        name: name.clone(),
        version: p.tool_version.clone(),
    });
    let model = p.model_name.as_ref().map(|name| Component {
        name: name.clone(),
        version: p.model_version.clone(),
    });
    (tool, model)
}

fn provenance(tool: Option<Component>, model: Option<Component>) -> Provenance {
    let (tool_name, tool_version) = tool.map_or((None, None), |c| (Some(c.name), c.version));
    let (model_name, model_version) = model.map_or((None, None), |c| (Some(c.name), c.version));
    Provenance {
        tool_name,
        tool_version,
        model_name,
        model_version,
    }
}

impl From<&Claim> for ClaimEntry {
    fn from(c: &Claim) -> Self {
        let (tool, model) = components(c.provenance());
        Self {
            id: c.id().map(str::to_string),
            statement: c.statement().to_string(),
            confidence: c.confidence(),
            supporting_evidence_ids: c.supporting_evidence_ids().to_vec(),
            counter_evidence_ids: c.counter_evidence_ids().to_vec(),
            run_fingerprint: c.run_fingerprint(),
            metadata: c.metadata().clone(),
            tool,
            model,
            timestamp: c.timestamp(),
        }
    }
}

impl From<&Evidence> for EvidenceEntry {
    fn from(ev: &Evidence) -> Self {
        let (tool, model) = components(ev.provenance());
        Self {
            id: ev.id().map(str::to_string),
            content: ev.content().to_string(),
            source: ev.source().to_string(),
            sha256: ev.content_hash(),
            fingerprint: ev.fingerprint(),
            metadata: ev.metadata().clone(),
            tool,
            model,
            timestamp: ev.timestamp(),
        }
    }
}

/// Result of re-hashing one evidence entry from a case file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceCheck {
    pub id: Option<String>,
    pub stored_sha256: String,
    pub computed_sha256: String,
    pub sha256_matches: bool,
    pub fingerprint_matches: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimCheck {
    pub id: Option<String>,
    pub fingerprint_matches: bool,
}

/// A case file read back from JSON, with records rebuilt from source fields
#[derive(Debug, Clone)]
pub struct ParsedCase {
    pub case: CaseFile,
    pub generated_at: String,
    pub evidence_checks: Vec<EvidenceCheck>,
    pub claim_checks: Vec<ClaimCheck>,
}

impl ParsedCase {
    /// Evidence whose stored SHA-256 disagrees with its content
    pub fn tampered_evidence(&self) -> Vec<&EvidenceCheck> {
        self.evidence_checks
            .iter()
            .filter(|c| !c.sha256_matches)
            .collect()
    }

    /// True when every stored hash and fingerprint matches its recomputation
    pub fn is_intact(&self) -> bool {
        self.evidence_checks
            .iter()
            .all(|c| c.sha256_matches && c.fingerprint_matches)
            && self.claim_checks.iter().all(|c| c.fingerprint_matches)
    }
}

/// Machine-readable case files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, case: &CaseFile) -> Result<String> {
        self.export_at(case, hash::now())
    }

    /// Render with an explicit generation time
    pub fn export_at(&self, case: &CaseFile, generated_at: DateTime<Utc>) -> Result<String> {
        let doc = CaseDocument {
            title: case.title.clone(),
            generated_at: hash::iso_timestamp(&generated_at),
            metadata: case.metadata.clone(),
            summary: CaseSummary {
                total_claims: case.claims.len(),
                total_evidence: case.evidence.len(),
            },
            claims: case.claims.iter().map(ClaimEntry::from).collect(),
            evidence: case.evidence.iter().map(EvidenceEntry::from).collect(),
        };

        tracing::debug!(
            title = %case.title,
            claims = doc.summary.total_claims,
            evidence = doc.summary.total_evidence,
            "Exported JSON case file"
        );
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Read a case file back.
    ///
    /// Records are rebuilt from their source fields, so stored hashes are
    /// only compared, never adopted. Claims are re-validated.
    pub fn parse(&self, raw: &str) -> Result<ParsedCase> {
        let doc: CaseDocument = serde_json::from_str(raw)?;

        let mut evidence = Vec::with_capacity(doc.evidence.len());
        let mut evidence_checks = Vec::with_capacity(doc.evidence.len());
        for entry in doc.evidence {
            let draft = NewEvidence::new(entry.content, entry.source)
                .with_metadata(entry.metadata)
                .with_provenance(provenance(entry.tool, entry.model));
            let ev = Evidence::create(draft, entry.id, entry.timestamp);

            let computed_sha256 = ev.content_hash();
            evidence_checks.push(EvidenceCheck {
                id: ev.id().map(str::to_string),
                sha256_matches: computed_sha256 == entry.sha256,
                fingerprint_matches: ev.fingerprint() == entry.fingerprint,
                stored_sha256: entry.sha256,
                computed_sha256,
            });
            evidence.push(ev);
        }

        let mut claims = Vec::with_capacity(doc.claims.len());
        let mut claim_checks = Vec::with_capacity(doc.claims.len());
        for entry in doc.claims {
            let draft = NewClaim::new(entry.statement, entry.confidence)
                .with_supporting(entry.supporting_evidence_ids)
                .with_counter(entry.counter_evidence_ids)
                .with_metadata(entry.metadata)
                .with_provenance(provenance(entry.tool, entry.model));
            let claim = Claim::create(draft, entry.id, entry.timestamp)?;

            claim_checks.push(ClaimCheck {
                id: claim.id().map(str::to_string),
                fingerprint_matches: claim.run_fingerprint() == entry.run_fingerprint,
            });
            claims.push(claim);
        }

        let parsed = ParsedCase {
            case: CaseFile {
                title: doc.title,
                metadata: doc.metadata,
                claims,
                evidence,
            },
            generated_at: doc.generated_at,
            evidence_checks,
            claim_checks,
        };

        let tampered = parsed.tampered_evidence().len();
        if tampered > 0 {
            tracing::warn!(tampered, "Case file contains evidence with mismatched hashes");
        }
        Ok(parsed)
    }
}
