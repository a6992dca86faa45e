//! Canonical hashing primitives
//!
//! Every derived hash in the record model goes through this module so that two
//! runs over the same inputs produce byte-identical digests:
//! - content hashes are SHA-256 over the UTF-8 bytes, lower-case hex
//! - fingerprints are SHA-256 over a key-sorted, compact JSON object
//! - timestamps inside fingerprints are RFC 3339 with microsecond precision

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of raw bytes, hex-encoded
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Current time at the precision records are stored with.
///
/// Truncating to microseconds keeps fingerprints stable when a record is
/// serialized and loaded again.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// ISO-8601 rendering used inside fingerprints, e.g. `2024-01-15T09:30:00.000000Z`
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Key-sorted JSON object used as fingerprint input
#[derive(Debug, Clone, Default)]
pub struct CanonicalFields {
    fields: BTreeMap<&'static str, Value>,
}

impl CanonicalFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.fields.insert(key, value.into());
        self
    }

    /// Compact JSON with keys in lexicographic order
    pub fn to_json(&self) -> String {
        // Built from the BTreeMap iterator, so the object is sorted whether or
        // not serde_json's `preserve_order` feature is enabled.
        let object: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        Value::Object(object).to_string()
    }

    pub fn digest(&self) -> String {
        sha256_hex(self.to_json().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(sha256_hex(b"anything").len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_canonical_fields_sorted() {
        let fields = CanonicalFields::new()
            .field("tool", Value::Null)
            .field("content_hash", "abc")
            .field("model", "m:1");

        assert_eq!(
            fields.to_json(),
            r#"{"content_hash":"abc","model":"m:1","tool":null}"#
        );
    }

    #[test]
    fn test_insertion_order_does_not_change_digest() {
        let a = CanonicalFields::new().field("a", 1).field("b", 2);
        let b = CanonicalFields::new().field("b", 2).field("a", 1);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_iso_timestamp_has_micros() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(iso_timestamp(&ts), "2024-01-15T09:30:00.000000Z");
    }

    #[test]
    fn test_now_is_truncated() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
    }
}
