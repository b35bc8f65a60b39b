//! Redraw drivers.
//!
//! # 構成
//! - **HeroAnimation**: 表示中だけ毎フレーム hero を再描画（tokio interval + watch で停止）
//! - **ServiceComparison**: チェックボックスの選択を保持し、変更ごとに全面再描画

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::ports::{Canvas2d, Clock};

use super::charts::Service;
use super::palette::Palette;
use super::registry::{Frame, RenderError, Renderer};

/// Element bounds in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// Fully inside the viewport; partially visible does not count.
pub fn is_in_viewport(rect: &Rect, viewport_width: f64, viewport_height: f64) -> bool {
    rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= viewport_height && rect.right <= viewport_width
}

pub struct HeroAnimation<C> {
    renderer: Renderer,
    canvas: Arc<Mutex<C>>,
    palette: Palette,
    clock: Arc<dyn Clock>,
    visible: watch::Receiver<bool>,
}

impl<C: Canvas2d + Send + 'static> HeroAnimation<C> {
    /// `visible` is fed by the host's scroll handler.
    pub fn new(
        renderer: Renderer,
        canvas: Arc<Mutex<C>>,
        palette: Palette,
        clock: Arc<dyn Clock>,
        visible: watch::Receiver<bool>,
    ) -> Self {
        Self {
            renderer,
            canvas,
            palette,
            clock,
            visible,
        }
    }

    /// Draw one frame if the canvas is on screen. Returns whether it drew.
    pub fn frame(&self) -> bool {
        if !*self.visible.borrow() {
            return false;
        }
        let frame = Frame {
            time_secs: self.clock.now_ms() as f64 / 1000.0,
            palette: self.palette,
            services: Vec::new(),
        };
        let mut canvas = self.canvas.lock();
        match self.renderer.draw("hero", Some(&mut *canvas), &frame) {
            Ok(drew) => drew,
            Err(err) => {
                tracing::warn!(error = %err, "hero frame skipped");
                false
            }
        }
    }

    /// Redraw every `interval` until shutdown. Returns the number of frames drawn.
    pub async fn run(self, interval: Duration, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut drawn = 0u64;

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if self.frame() {
                        drawn += 1;
                    }
                }
            }
        }
        tracing::debug!(frames = drawn, "hero animation stopped");
        drawn
    }
}

/// Comparison chart plus its checkbox state.
pub struct ServiceComparison<C> {
    renderer: Renderer,
    canvas: C,
    palette: Palette,
    selected: BTreeSet<Service>,
}

impl<C: Canvas2d> ServiceComparison<C> {
    /// Draws the initial (placeholder) state immediately.
    pub fn new(renderer: Renderer, canvas: C, palette: Palette) -> Result<Self, RenderError> {
        let mut this = Self {
            renderer,
            canvas,
            palette,
            selected: BTreeSet::new(),
        };
        this.redraw()?;
        Ok(this)
    }

    pub fn toggle(&mut self, service: Service, checked: bool) -> Result<(), RenderError> {
        if checked {
            self.selected.insert(service);
        } else {
            self.selected.remove(&service);
        }
        self.redraw()
    }

    /// Selection in checkbox order.
    pub fn selected(&self) -> Vec<Service> {
        self.selected.iter().copied().collect()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        let frame = Frame {
            time_secs: 0.0,
            palette: self.palette,
            services: self.selected(),
        };
        self.renderer
            .draw("service-comparison", Some(&mut self.canvas), &frame)
            .map(|_| ())
    }
}
