//! Storage - prefixed key-value storage with expiry and eviction
//!
//! # 概要
//! 2 つの `KeyValueStore`（durable / session）の上に StoredRecord
//! エンベロープを載せます。論理キー `theme` は `<prefix>theme` に保存されます。
//!
//! # 失敗時の方針
//! - 公開 API（`set` / `get` / `remove` / `clear`）は失敗しても panic せず、
//!   ログを出して `false` / `None` を返す
//! - `try_*` は `Result<_, StorageError>` を返す
//!
//! # 容量
//! durable への書き込み前に「既存サイズ + 新しいレコード」が上限を超える場合、
//! 最も古くアクセスされた 25% を削除してから書き込みます（`eviction`）。

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::StorageConfig;
use crate::domain::{DomainEvent, StorageAction, StorageError, StoredRecord};
use crate::ports::{Clock, EventSink, KeyValueStore};

pub mod eviction;
pub mod export;
pub mod keys;
pub mod stats;

pub use self::eviction::{EvictionReport, select_victims};
pub use self::export::ExportBundle;
pub use self::stats::{ItemInfo, StorageStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Durable,
    /// Cleared at the end of the browsing session.
    Session,
}

#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    pub scope: Scope,
    pub expires_in: Option<Duration>,
    pub version: Option<String>,
}

impl SetOptions {
    pub fn session() -> Self {
        Self {
            scope: Scope::Session,
            ..Self::default()
        }
    }

    pub fn expires_in(mut self, ttl: Duration) -> Self {
        self.expires_in = Some(ttl);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetOptions {
    pub scope: Scope,
    /// Rewrite the record with `lastAccess = now`.
    pub update_access: bool,
}

impl GetOptions {
    pub fn session() -> Self {
        Self {
            scope: Scope::Session,
            update_access: false,
        }
    }

    pub fn touching() -> Self {
        Self {
            scope: Scope::Durable,
            update_access: true,
        }
    }
}

/// What to do after another tab changed a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeRoute {
    ReloadPreferences,
    ApplyTheme,
    Ignore,
}

pub struct Storage {
    config: StorageConfig,
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

impl Storage {
    /// Probes the durable store first; an unusable store is
    /// `StorageError::Unavailable` and the caller runs without storage.
    pub fn new(
        config: StorageConfig,
        durable: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, StorageError> {
        probe(durable.as_ref())?;
        tracing::info!(prefix = %config.prefix, max_bytes = config.max_storage_size, "storage ready");
        Ok(Self {
            config,
            durable,
            session,
            clock,
            events,
        })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.config.prefix, key)
    }

    fn store(&self, scope: Scope) -> &dyn KeyValueStore {
        match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }

    fn emit_change(&self, action: StorageAction, key: Option<&str>) {
        self.events.emit(DomainEvent::StorageChanged {
            action,
            key: key.map(str::to_string),
            at_ms: self.now_ms(),
        });
    }

    /// Store `value` under `key`. Returns false (and logs) on failure.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, options: SetOptions) -> bool {
        match self.try_set(key, value, options) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, kind = ?err.kind(), "storage set failed");
                false
            }
        }
    }

    /// Only durable writes are checked against `max_storage_size`; session
    /// writes never evict.
    pub fn try_set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: SetOptions,
    ) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        let version = options
            .version
            .unwrap_or_else(|| self.config.default_version.clone());
        let record = StoredRecord::new(value, self.now_ms(), options.expires_in, version);
        let raw = record.encode()?;

        let full_key = self.full_key(key);
        if options.scope == Scope::Durable {
            // an overwrite frees the record it replaces
            let replaced = self.durable.get(&full_key)?.map_or(0, |old| old.len() as u64);
            let used = self.try_storage_size()?.saturating_sub(replaced);
            if used + raw.len() as u64 > self.config.max_storage_size {
                let report = self.evict_oldest()?;
                tracing::debug!(
                    used,
                    incoming = raw.len(),
                    evicted = report.evicted.len(),
                    corrupted = report.corrupted.len(),
                    "storage over capacity, evicted oldest entries"
                );
            }
        }

        self.store(options.scope).set(&full_key, &raw)?;
        self.emit_change(StorageAction::Set, Some(key));
        Ok(())
    }

    /// Absent, expired, or unreadable entries are all `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, options: GetOptions) -> Option<T> {
        match self.try_get(key, options) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "storage get failed");
                None
            }
        }
    }

    pub fn try_get<T: DeserializeOwned>(
        &self,
        key: &str,
        options: GetOptions,
    ) -> Result<Option<T>, StorageError> {
        let full_key = self.full_key(key);
        let store = self.store(options.scope);
        let Some(raw) = store.get(&full_key)? else {
            return Ok(None);
        };
        let mut record =
            StoredRecord::decode(&raw).map_err(|_| StorageError::Corrupted(full_key.clone()))?;

        let now = self.now_ms();
        if record.is_expired(now) {
            tracing::debug!(key, expires = ?record.expires, now, "dropping expired record");
            self.try_remove(key, options.scope)?;
            return Ok(None);
        }

        if options.update_access {
            record.touch(now);
            store.set(&full_key, &record.encode()?)?;
        }

        Ok(Some(serde_json::from_value(record.value)?))
    }

    pub fn remove(&self, key: &str, scope: Scope) -> bool {
        match self.try_remove(key, scope) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "storage remove failed");
                false
            }
        }
    }

    pub fn try_remove(&self, key: &str, scope: Scope) -> Result<(), StorageError> {
        self.store(scope).remove(&self.full_key(key))?;
        self.emit_change(StorageAction::Remove, Some(key));
        Ok(())
    }

    /// Delete every prefixed entry in `scope`. Foreign keys are left alone.
    pub fn clear(&self, scope: Scope) -> bool {
        let result = self.try_all_keys(scope).and_then(|keys| {
            let store = self.store(scope);
            for key in &keys {
                store.remove(key)?;
            }
            Ok(keys.len())
        });
        match result {
            Ok(removed) => {
                tracing::info!(?scope, removed, "storage cleared");
                self.emit_change(StorageAction::Clear, None);
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "storage clear failed");
                false
            }
        }
    }

    /// Full (prefixed) keys in `scope`.
    pub fn all_keys(&self, scope: Scope) -> Vec<String> {
        self.try_all_keys(scope).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "listing storage keys failed");
            Vec::new()
        })
    }

    fn try_all_keys(&self, scope: Scope) -> Result<Vec<String>, StorageError> {
        let keys = self.store(scope).list_keys()?;
        Ok(keys
            .into_iter()
            .filter(|k| k.starts_with(&self.config.prefix))
            .collect())
    }

    /// Sum of raw value lengths over durable prefixed entries.
    pub fn storage_size(&self) -> u64 {
        self.try_storage_size().unwrap_or(0)
    }

    fn try_storage_size(&self) -> Result<u64, StorageError> {
        let mut total = 0u64;
        for key in self.try_all_keys(Scope::Durable)? {
            if let Some(raw) = self.durable.get(&key)? {
                total += raw.len() as u64;
            }
        }
        Ok(total)
    }

    /// Route a change made by another tab to the reload it needs.
    pub fn on_external_change(
        &self,
        full_key: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> ChangeRoute {
        let Some(key) = full_key.strip_prefix(&self.config.prefix) else {
            return ChangeRoute::Ignore;
        };
        tracing::debug!(
            key,
            had_old = old_value.is_some(),
            has_new = new_value.is_some(),
            "storage changed in another tab"
        );
        match key {
            keys::USER_PREFERENCES => ChangeRoute::ReloadPreferences,
            keys::THEME => ChangeRoute::ApplyTheme,
            _ => ChangeRoute::Ignore,
        }
    }
}

fn probe(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store
        .set(keys::PROBE_KEY, keys::PROBE_KEY)
        .and_then(|()| store.remove(keys::PROBE_KEY))
        .map_err(|err| {
            tracing::warn!(error = %err, "persistent storage is not available");
            StorageError::Unavailable(err.to_string())
        })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::impls::{InMemoryStore, RecordingEventSink};
    use crate::ports::ManualClock;
    use chrono::{TimeZone, Utc};

    pub struct Fixture {
        pub storage: Storage,
        pub durable: Arc<InMemoryStore>,
        pub session: Arc<InMemoryStore>,
        pub clock: Arc<ManualClock>,
        pub events: Arc<RecordingEventSink>,
    }

    pub fn fixture_with(config: StorageConfig) -> Fixture {
        let durable = Arc::new(InMemoryStore::new());
        let session = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        ));
        let events = Arc::new(RecordingEventSink::new());
        let storage = Storage::new(
            config,
            durable.clone(),
            session.clone(),
            clock.clone(),
            events.clone(),
        )
        .unwrap();
        Fixture {
            storage,
            durable,
            session,
            clock,
            events,
        }
    }

    pub fn fixture() -> Fixture {
        fixture_with(StorageConfig::default())
    }
}
