//! StoredRecord - the JSON envelope written under every storage key.
//!
//! Layout on disk (camelCase, one object per key):
//!
//! ```text
//! { "value": ..., "timestamp": 1700000000000, "expires": null,
//!   "version": "1.0", "compressed": false, "lastAccess": 1700000005000 }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_VERSION: &str = "1.0";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Envelope around one stored value.
///
/// `expires` and `last_access` are epoch milliseconds. A record whose
/// `expires` lies in the past is treated as absent by every reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub value: serde_json::Value,
    pub timestamp: i64,
    #[serde(default)]
    pub expires: Option<i64>,
    #[serde(default = "default_version")]
    pub version: String,
    /// Kept for layout compatibility; always written as `false`.
    #[serde(default)]
    pub compressed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<i64>,
}

impl StoredRecord {
    pub fn new(
        value: serde_json::Value,
        now_ms: i64,
        expires_in: Option<Duration>,
        version: impl Into<String>,
    ) -> Self {
        let expires = expires_in
            .map(|d| now_ms.saturating_add(i64::try_from(d.as_millis()).unwrap_or(i64::MAX)));
        Self {
            value,
            timestamp: now_ms,
            expires,
            version: version.into(),
            compressed: false,
            last_access: None,
        }
    }

    /// Strictly after the expiry instant.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires.is_some_and(|expires| now_ms > expires)
    }

    /// Recency used by eviction: last access, else the write time.
    pub fn recency(&self) -> i64 {
        self.last_access.unwrap_or(self.timestamp)
    }

    pub fn touch(&mut self, now_ms: i64) {
        self.last_access = Some(now_ms);
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expiry_is_strictly_after_the_instant() {
        let record = StoredRecord::new(json!(1), 1_000, Some(Duration::from_millis(500)), "1.0");
        assert_eq!(record.expires, Some(1_500));
        assert!(!record.is_expired(1_500));
        assert!(record.is_expired(1_501));
    }

    #[test]
    fn huge_ttl_saturates_instead_of_wrapping() {
        let now = 1_700_000_000_000;
        let record = StoredRecord::new(json!(1), now, Some(Duration::from_millis(u64::MAX)), "1.0");
        assert_eq!(record.expires, Some(i64::MAX));
        assert!(!record.is_expired(now + 1));
    }

    #[test]
    fn record_without_expiry_never_expires() {
        let record = StoredRecord::new(json!("x"), 1_000, None, "1.0");
        assert!(!record.is_expired(i64::MAX));
    }

    #[test]
    fn recency_prefers_last_access() {
        let mut record = StoredRecord::new(json!(null), 10, None, "1.0");
        assert_eq!(record.recency(), 10);
        record.touch(42);
        assert_eq!(record.recency(), 42);
    }

    #[test]
    fn encodes_camel_case_layout() {
        let mut record = StoredRecord::new(json!({"a": 1}), 5, None, "2.0");
        record.touch(6);
        let raw = record.encode().unwrap();
        assert!(raw.contains("\"lastAccess\":6"), "got {raw}");
        assert!(raw.contains("\"expires\":null"), "got {raw}");
        assert!(raw.contains("\"compressed\":false"), "got {raw}");
    }

    #[test]
    fn decodes_legacy_compressed_flag() {
        let raw = r#"{"value":{"k":"v"},"timestamp":1,"expires":null,"version":"1.0","compressed":true}"#;
        let record = StoredRecord::decode(raw).unwrap();
        assert!(record.compressed);
        assert_eq!(record.value, json!({"k": "v"}));
        assert_eq!(record.last_access, None);
    }

    #[test]
    fn rejects_envelopes_without_timestamp() {
        assert!(StoredRecord::decode(r#"{"value":1}"#).is_err());
        assert!(StoredRecord::decode("not json").is_err());
    }
}
