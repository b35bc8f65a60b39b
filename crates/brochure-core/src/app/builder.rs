//! SiteBuilder - ページ文脈（Site）の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターン（ports の差し替えはすべてここで行う）
//! - 起動時検証（Fail-fast 設計）: 期待する chart が未登録なら build() で失敗
//! - ストレージが使えない場合は build() を失敗させず、機能を無効化して続行

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{ConfigError, SiteConfig};
use crate::domain::{BodyAttributes, UserPreferences};
use crate::impls::{InMemoryStore, TracingEventSink};
use crate::ports::{Clock, EventSink, IdGenerator, KeyValueStore, SystemClock, UlidGenerator};
use crate::render::{RenderError, Renderer, Visualization, VisualizationRegistry, builtin_registry};
use crate::storage::Storage;
use crate::upload::{UploadManager, UploadPolicy};

use super::site::Site;

/// # 使用例
/// ```ignore
/// let site = SiteBuilder::new(SiteConfig::default())
///     .durable_store(Arc::new(FileStore::open(path)?))
///     .with_builtin_charts()?
///     .expect_visualizations(&["hero", "vision"])
///     .build()?;
/// ```
pub struct SiteBuilder {
    config: SiteConfig,
    durable: Option<Arc<dyn KeyValueStore>>,
    session: Option<Arc<dyn KeyValueStore>>,
    clock: Arc<dyn Clock>,
    ids: Option<Arc<dyn IdGenerator>>,
    events: Arc<dyn EventSink>,
    registry: VisualizationRegistry,
    expected_charts: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing visualizations: {0:?}. These charts were expected but not registered.")]
    MissingVisualizations(Vec<String>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SiteBuilder {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            durable: None,
            session: None,
            clock: Arc::new(SystemClock),
            ids: None,
            events: Arc::new(TracingEventSink),
            registry: VisualizationRegistry::new(),
            expected_charts: None,
        }
    }

    /// Defaults to an in-memory store.
    pub fn durable_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.durable = Some(store);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.session = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Defaults to ULIDs stamped with the builder's clock.
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn register_chart<V: Visualization + 'static>(mut self, chart: V) -> Result<Self, RenderError> {
        self.registry.register(chart)?;
        Ok(self)
    }

    /// Replace the registry with every built-in chart.
    pub fn with_builtin_charts(mut self) -> Result<Self, RenderError> {
        self.registry = builtin_registry()?;
        Ok(self)
    }

    pub fn expect_visualizations(mut self, kinds: &[&str]) -> Self {
        self.expected_charts = Some(kinds.iter().map(|k| k.to_string()).collect());
        self
    }

    /// # 検証
    /// - 設定値（`SiteConfig::validate`）
    /// - expect_visualizations() の kind がすべて登録済みか
    pub fn build(self) -> Result<Site, BuildError> {
        self.config.validate()?;

        if let Some(expected) = &self.expected_charts {
            let registered = self.registry.registered_kinds();
            let missing: Vec<String> = expected
                .iter()
                .filter(|kind| !registered.contains(&kind.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingVisualizations(missing));
            }
        }

        let durable = self
            .durable
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()) as Arc<dyn KeyValueStore>);
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()) as Arc<dyn KeyValueStore>);
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(Arc::clone(&self.clock))) as Arc<dyn IdGenerator>);

        let storage = match Storage::new(
            self.config.storage.clone(),
            durable,
            session,
            Arc::clone(&self.clock),
            Arc::clone(&self.events),
        ) {
            Ok(storage) => Some(storage),
            Err(err) => {
                tracing::warn!(error = %err, "storage features disabled");
                None
            }
        };

        let policy = UploadPolicy::new(self.config.upload.max_file_size);
        let uploads = UploadManager::new(policy, Arc::clone(&ids), Arc::clone(&self.events));

        tracing::info!(
            charts = ?self.registry.registered_kinds(),
            storage = storage.is_some(),
            "site built"
        );

        let site = Site {
            config: self.config,
            storage,
            preferences: Mutex::new(UserPreferences::default()),
            body: Mutex::new(BodyAttributes::default()),
            uploads: Arc::new(Mutex::new(uploads)),
            renderer: Renderer::new(Arc::new(self.registry)),
            clock: self.clock,
            ids,
            events: self.events,
        };
        site.load_preferences();
        Ok(site)
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::charts::HeroChart;

    #[test]
    fn builds_with_builtin_charts() {
        let site = SiteBuilder::default()
            .with_builtin_charts()
            .unwrap()
            .expect_visualizations(&["hero", "values"])
            .build()
            .unwrap();
        assert!(site.storage().is_some());
        assert_eq!(site.renderer().registry().registered_kinds().len(), 8);
    }

    #[test]
    fn missing_charts_fail_fast() {
        let result = SiteBuilder::default()
            .register_chart(HeroChart)
            .unwrap()
            .expect_visualizations(&["hero", "mission", "vision"])
            .build();
        assert!(matches!(
            result,
            Err(BuildError::MissingVisualizations(missing)) if missing == vec!["mission".to_string(), "vision".to_string()]
        ));
    }

    #[test]
    fn duplicate_chart_registration_is_rejected() {
        let result = SiteBuilder::default()
            .register_chart(HeroChart)
            .unwrap()
            .register_chart(HeroChart);
        assert!(matches!(result, Err(RenderError::AlreadyRegistered(_))));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SiteConfig::default();
        config.storage.prefix.clear();
        assert!(matches!(
            SiteBuilder::new(config).build(),
            Err(BuildError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn unavailable_storage_degrades_instead_of_failing() {
        let site = SiteBuilder::default()
            .durable_store(Arc::new(InMemoryStore::unavailable()))
            .build()
            .unwrap();
        assert!(site.storage().is_none());
        assert_eq!(site.preferences(), UserPreferences::default());
    }
}
