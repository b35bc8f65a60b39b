//! Site configuration.
//!
//! Loaded from a JSON file with camelCase keys. Every section and field has
//! a default, so `{}` is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DEFAULT_VERSION;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Prepended to every logical key.
    pub prefix: String,
    /// Byte cap over durable prefixed entries; overflow triggers eviction.
    pub max_storage_size: u64,
    pub cleanup_interval_secs: u64,
    pub default_version: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prefix: "techviet_".to_string(),
            max_storage_size: 5 * 1024 * 1024,
            cleanup_interval_secs: 60,
            default_version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadConfig {
    pub max_file_size: u64,
    /// Whether drop zones accept more than one file at once.
    pub multiple: bool,
    pub tick_min_ms: u64,
    pub tick_max_ms: u64,
    /// Upper bound (exclusive) of the random progress step, in percent.
    pub max_step: f64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            multiple: true,
            tick_min_ms: 100,
            tick_max_ms: 300,
            max_step: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub frame_interval_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            frame_interval_ms: 16,
        }
    }
}

impl RenderConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub render: RenderConfig,
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Missing file means defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.prefix.is_empty() {
            return Err(ConfigError::Invalid("storage.prefix must not be empty".into()));
        }
        if self.storage.max_storage_size == 0 {
            return Err(ConfigError::Invalid("storage.maxStorageSize must be > 0".into()));
        }
        if self.storage.cleanup_interval_secs == 0 {
            return Err(ConfigError::Invalid("storage.cleanupIntervalSecs must be > 0".into()));
        }
        if self.upload.max_file_size == 0 {
            return Err(ConfigError::Invalid("upload.maxFileSize must be > 0".into()));
        }
        if self.upload.tick_min_ms == 0 || self.upload.tick_min_ms > self.upload.tick_max_ms {
            return Err(ConfigError::Invalid(format!(
                "upload tick range {}..={} ms is empty",
                self.upload.tick_min_ms, self.upload.tick_max_ms
            )));
        }
        if !(self.upload.max_step.is_finite() && self.upload.max_step > 0.0) {
            return Err(ConfigError::Invalid("upload.maxStep must be > 0".into()));
        }
        if self.render.width == 0 || self.render.height == 0 || self.render.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid("render sizes and frame interval must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.storage.prefix, "techviet_");
        assert_eq!(config.storage.max_storage_size, 5 * 1024 * 1024);
        assert_eq!(config.upload.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{"storage":{"maxStorageSize":2048}}"#).unwrap();
        assert_eq!(config.storage.max_storage_size, 2048);
        assert_eq!(config.storage.cleanup_interval_secs, 60);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_string(&SiteConfig::default()).unwrap();
        assert!(json.contains("maxStorageSize"), "got {json}");
        assert!(!json.contains("max_storage_size"), "got {json}");
    }

    #[test]
    fn rejects_zero_caps() {
        let err = SiteConfig::from_json(r#"{"upload":{"maxFileSize":0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SiteConfig::from_json(r#"{"upload":{"tickMinMs":500,"tickMaxMs":100}}"#).unwrap_err();
        assert!(err.to_string().contains("tick range"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::from_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, r#"{"render":{"width":320,"height":200}}"#).unwrap();

        let config = SiteConfig::from_file(&path).unwrap();
        assert_eq!(config.render.width, 320);
        assert_eq!(config.render.frame_interval_ms, 16);
    }
}
