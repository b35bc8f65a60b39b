//! Usage statistics and debug views over the durable store.

use serde::Serialize;

use crate::domain::StoredRecord;
use crate::validate::format_bytes;

use super::{GetOptions, Scope, Storage, keys};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_keys: usize,
    pub total_size: u64,
    pub size_formatted: String,
    /// Percent of `max_storage_size` in use.
    pub usage_percent: f64,
    pub sessions: u64,
    pub last_activity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemInfo {
    Valid {
        key: String,
        size: usize,
        #[serde(rename = "sizeFormatted")]
        size_formatted: String,
        timestamp: i64,
        expires: Option<i64>,
        compressed: bool,
        version: String,
    },
    Invalid {
        key: String,
        error: String,
    },
}

impl Storage {
    pub fn stats(&self) -> StorageStats {
        let total_size = self.storage_size();
        StorageStats {
            total_keys: self.all_keys(Scope::Durable).len(),
            total_size,
            size_formatted: format_bytes(total_size),
            usage_percent: total_size as f64 / self.config.max_storage_size as f64 * 100.0,
            sessions: self.get(keys::SESSION_COUNT, GetOptions::default()).unwrap_or(0),
            last_activity: self.get(keys::LAST_ACTIVITY, GetOptions::session()),
        }
    }

    /// Logical (unprefixed) durable keys.
    pub fn list_logical_keys(&self) -> Vec<String> {
        self.all_keys(Scope::Durable)
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.config.prefix).map(str::to_string))
            .collect()
    }

    pub fn item_info(&self, key: &str) -> Option<ItemInfo> {
        let raw = match self.durable.get(&self.full_key(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "item info lookup failed");
                return None;
            }
        };
        Some(match StoredRecord::decode(&raw) {
            Ok(record) => ItemInfo::Valid {
                key: key.to_string(),
                size: raw.len(),
                size_formatted: format_bytes(raw.len() as u64),
                timestamp: record.timestamp,
                expires: record.expires,
                compressed: record.compressed,
                version: record.version,
            },
            Err(_) => ItemInfo::Invalid {
                key: key.to_string(),
                error: "Invalid JSON".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::SetOptions;
    use super::super::test_support::*;
    use super::*;
    use crate::ports::KeyValueStore;

    #[test]
    fn stats_reflect_size_sessions_and_activity() {
        let f = fixture();
        f.storage.set(keys::SESSION_COUNT, &3u64, SetOptions::default());
        f.storage.set(keys::LAST_ACTIVITY, &42i64, SetOptions::session());

        let stats = f.storage.stats();
        assert_eq!(stats.total_keys, 1);
        assert_eq!(stats.total_size, f.storage.storage_size());
        assert_eq!(stats.sessions, 3);
        assert_eq!(stats.last_activity, Some(42));
        assert!(stats.usage_percent > 0.0 && stats.usage_percent < 1.0);
        assert!(stats.size_formatted.ends_with("Bytes"));
    }

    #[test]
    fn empty_store_stats() {
        let stats = fixture().storage.stats();
        assert_eq!(stats.total_keys, 0);
        assert_eq!(stats.size_formatted, "0 Bytes");
        assert_eq!(stats.sessions, 0);
        assert_eq!(stats.last_activity, None);
    }

    #[test]
    fn item_info_describes_valid_and_broken_entries() {
        let f = fixture();
        f.storage.set("theme", "dark", SetOptions::default().version("2.0"));
        f.durable.set("techviet_junk", "{").unwrap();

        match f.storage.item_info("theme").unwrap() {
            ItemInfo::Valid {
                key,
                version,
                compressed,
                expires,
                ..
            } => {
                assert_eq!(key, "theme");
                assert_eq!(version, "2.0");
                assert!(!compressed);
                assert_eq!(expires, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            f.storage.item_info("junk"),
            Some(ItemInfo::Invalid { ref error, .. }) if error == "Invalid JSON"
        ));
        assert_eq!(f.storage.item_info("absent"), None);

        let mut logical = f.storage.list_logical_keys();
        logical.sort();
        assert_eq!(logical, vec!["junk".to_string(), "theme".to_string()]);
    }
}
