//! InMemoryStore - session スコープとテスト用の key-value ストア
//!
//! # 実装詳細
//! - BTreeMap<String, String> を Mutex で保護（キー順が決定的）
//! - 任意の容量上限（key + value のバイト数）で QuotaExceeded を再現できる
//! - `unavailable()` でストレージを無効化したブラウザを再現できる

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::ports::{KeyValueStore, KvError};

pub struct InMemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
    available: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota: None,
            available: true,
        }
    }

    /// Store that refuses writes once key + value bytes would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Store whose every operation fails, like a browser with storage disabled.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn check_available(&self) -> Result<(), KvError> {
        if self.available {
            Ok(())
        } else {
            Err(KvError::Unavailable("in-memory store disabled".to_string()))
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn used_bytes(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        self.check_available()?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.check_available()?;
        let mut entries = self.entries.lock();
        if let Some(limit) = self.quota {
            let replaced = entries.get(key).map(|old| key.len() + old.len()).unwrap_or(0);
            let needed = used_bytes(&entries) - replaced + key.len() + value.len();
            if needed > limit {
                return Err(KvError::QuotaExceeded { needed, limit });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        self.check_available()?;
        self.entries.lock().remove(key);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, KvError> {
        self.check_available()?;
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
