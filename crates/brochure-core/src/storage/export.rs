//! Export / import of every durable prefixed entry.
//!
//! The file is a single JSON object mapping each full key to its raw stored
//! string. Import writes those strings back verbatim.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{DomainEvent, StorageAction, StorageError};

use super::{Scope, Storage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub entries: BTreeMap<String, String>,
    pub file_name: String,
}

impl ExportBundle {
    pub fn to_json_pretty(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `<prefix>data_<YYYY-MM-DD>.json`
pub fn export_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}data_{}.json", at.format("%Y-%m-%d"))
}

impl Storage {
    pub fn export_data(&self) -> Result<ExportBundle, StorageError> {
        let mut entries = BTreeMap::new();
        for key in self.try_all_keys(Scope::Durable)? {
            match self.durable.get(&key) {
                Ok(Some(raw)) => {
                    entries.insert(key, raw);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(key = %key, error = %err, "failed to export key"),
            }
        }
        let file_name = export_file_name(&self.config.prefix, self.clock.now());
        tracing::info!(entries = entries.len(), %file_name, "storage exported");
        Ok(ExportBundle { entries, file_name })
    }

    /// Write back every prefixed key of an exported object; returns how many
    /// were imported. Keys without the prefix are skipped.
    pub fn import_data(&self, raw: &str) -> Result<usize, StorageError> {
        let parsed: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| StorageError::Import(e.to_string()))?;
        let object = parsed
            .as_object()
            .ok_or_else(|| StorageError::Import("expected a JSON object".to_string()))?;

        let mut imported = 0;
        for (key, value) in object {
            if !key.starts_with(&self.config.prefix) {
                tracing::debug!(key = %key, "skipping foreign key on import");
                continue;
            }
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.durable.set(key, &text)?;
            imported += 1;
        }

        tracing::info!(imported, "storage imported");
        self.events.emit(DomainEvent::StorageChanged {
            action: StorageAction::Import,
            key: None,
            at_ms: self.now_ms(),
        });
        Ok(imported)
    }
}
