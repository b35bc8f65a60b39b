//! Capacity eviction and the expiry sweep.
//!
//! Both are full linear scans over the durable prefixed keys. Nothing is
//! maintained incrementally; key counts on a brochure site stay small.

use crate::domain::{StorageError, StoredRecord};

use super::Storage;

/// Share of the entries dropped on overflow.
pub const EVICTION_FRACTION_DENOMINATOR: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvictionReport {
    /// Full keys removed because they were the least recently used.
    pub evicted: Vec<String>,
    /// Full keys removed because their JSON was unreadable.
    pub corrupted: Vec<String>,
}

/// Pick the `ceil(n / 4)` entries with the oldest recency.
///
/// Ties keep their input order, so the result is deterministic.
pub fn select_victims(mut entries: Vec<(String, i64)>) -> Vec<String> {
    let count = entries.len().div_ceil(EVICTION_FRACTION_DENOMINATOR);
    entries.sort_by_key(|(_, recency)| *recency);
    entries.into_iter().take(count).map(|(key, _)| key).collect()
}

impl Storage {
    /// Drop the least recently accessed quarter of durable entries.
    /// Corrupted entries found on the way are deleted too and do not count
    /// toward the quarter.
    pub fn evict_oldest(&self) -> Result<EvictionReport, StorageError> {
        let mut report = EvictionReport::default();
        let mut entries = Vec::new();

        for key in self.try_all_keys(super::Scope::Durable)? {
            let Some(raw) = self.durable.get(&key)? else {
                continue;
            };
            match StoredRecord::decode(&raw) {
                Ok(record) => entries.push((key, record.recency())),
                Err(_) => {
                    self.durable.remove(&key)?;
                    report.corrupted.push(key);
                }
            }
        }

        for key in select_victims(entries) {
            self.durable.remove(&key)?;
            report.evicted.push(key);
        }

        tracing::debug!(
            evicted = report.evicted.len(),
            corrupted = report.corrupted.len(),
            "eviction pass finished"
        );
        Ok(report)
    }

    /// Delete expired and corrupted durable entries; returns how many went.
    pub fn cleanup_expired(&self) -> Result<usize, StorageError> {
        let now = self.now_ms();
        let mut removed = 0;

        for key in self.try_all_keys(super::Scope::Durable)? {
            let Some(raw) = self.durable.get(&key)? else {
                continue;
            };
            let stale = match StoredRecord::decode(&raw) {
                Ok(record) => record.is_expired(now),
                Err(_) => true,
            };
            if stale {
                self.durable.remove(&key)?;
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::debug!(removed, "expired storage entries removed");
        }
        Ok(removed)
    }
}
