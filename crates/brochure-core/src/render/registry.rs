//! VisualizationRegistry - chart の登録と描画ディスパッチ
//!
//! # 責務
//! - kind 文字列（`"hero"`, `"vision"` など）→ Visualization の対応を保持
//! - 二重登録は `RenderError::AlreadyRegistered`
//! - `Renderer::draw` は描画面がなければ何もしない（ホスト側の存在チェック相当）

use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::Canvas2d;

use super::charts::Service;
use super::palette::Palette;

/// Per-invocation input. Every draw is a full repaint from this.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Seconds on the animation clock; only animated charts read it.
    pub time_secs: f64,
    pub palette: Palette,
    /// Checked services, in checkbox order.
    pub services: Vec<Service>,
}

impl Frame {
    pub fn at(time_secs: f64) -> Self {
        Self {
            time_secs,
            ..Self::default()
        }
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            time_secs: 0.0,
            palette: Palette::SITE,
            services: Vec::new(),
        }
    }
}

pub trait Visualization: Send + Sync {
    fn kind(&self) -> &'static str;
    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame);
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("visualization '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("unknown visualization '{0}'")]
    UnknownVisualization(String),
}

#[derive(Default)]
pub struct VisualizationRegistry {
    charts: HashMap<&'static str, Arc<dyn Visualization>>,
}

impl VisualizationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<V: Visualization + 'static>(&mut self, chart: V) -> Result<(), RenderError> {
        let kind = chart.kind();
        if self.charts.contains_key(kind) {
            return Err(RenderError::AlreadyRegistered(kind.to_string()));
        }
        self.charts.insert(kind, Arc::new(chart));
        Ok(())
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn Visualization>> {
        self.charts.get(kind).cloned()
    }

    /// Registered kinds, sorted.
    pub fn registered_kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.charts.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

#[derive(Clone)]
pub struct Renderer {
    registry: Arc<VisualizationRegistry>,
}

impl Renderer {
    pub fn new(registry: Arc<VisualizationRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &VisualizationRegistry {
        &self.registry
    }

    /// Repaint `kind` onto `canvas`.
    ///
    /// Returns `Ok(false)` when there is no surface to draw on. The kind is
    /// resolved first so a typo is reported even on pages without the canvas.
    pub fn draw(
        &self,
        kind: &str,
        canvas: Option<&mut dyn Canvas2d>,
        frame: &Frame,
    ) -> Result<bool, RenderError> {
        let chart = self
            .registry
            .get(kind)
            .ok_or_else(|| RenderError::UnknownVisualization(kind.to_string()))?;
        let Some(canvas) = canvas else {
            tracing::trace!(kind, "no surface, skipping draw");
            return Ok(false);
        };
        chart.draw(canvas, frame);
        Ok(true)
    }
}
