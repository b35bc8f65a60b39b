//! Site - one page's explicit context object
//!
//! 設定・ストレージ・アップロード・描画をまとめて保持し、
//! 必要な機能に `&Site`（または `Arc<Site>`）として渡します。
//! グローバル状態は持ちません。

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::SiteConfig;
use crate::domain::{BodyAttributes, DomainEvent, UserPreferences};
use crate::impls::DisplayList;
use crate::ports::{Canvas2d, Clock, EventSink, IdGenerator};
use crate::render::{Frame, HeroAnimation, Palette, RenderError, Renderer};
use crate::storage::Storage;
use crate::upload::UploadManager;

pub struct Site {
    pub(super) config: SiteConfig,
    /// `None` when the durable store failed its probe.
    pub(super) storage: Option<Storage>,
    pub(super) preferences: Mutex<UserPreferences>,
    pub(super) body: Mutex<BodyAttributes>,
    pub(super) uploads: Arc<Mutex<UploadManager>>,
    pub(super) renderer: Renderer,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn IdGenerator>,
    pub(super) events: Arc<dyn EventSink>,
}

/// What `boot` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootReport {
    pub expired_removed: usize,
    pub new_session: bool,
    pub page_views: u64,
}

impl Site {
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn storage(&self) -> Option<&Storage> {
        self.storage.as_ref()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn uploads(&self) -> Arc<Mutex<UploadManager>> {
        Arc::clone(&self.uploads)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Page-load sequence for `path`: drop expired entries, count the view,
    /// start or continue the session. Preferences were loaded by `build()`.
    pub fn boot(&self, path: &str) -> BootReport {
        let expired_removed = match self.storage() {
            Some(storage) => storage.cleanup_expired().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "startup cleanup failed");
                0
            }),
            None => 0,
        };
        let page_views = self.track_page_view(path);
        let new_session = self.track_session();

        tracing::info!(path, expired_removed, new_session, "page booted");
        BootReport {
            expired_removed,
            new_session,
            page_views,
        }
    }

    /// Emit a toast when the user has notifications on. Returns whether it was sent.
    pub fn notify(&self, message: &str) -> bool {
        if !self.preferences.lock().notifications {
            tracing::debug!(message, "notification suppressed");
            return false;
        }
        self.events.emit(DomainEvent::Notification {
            message: message.to_string(),
        });
        true
    }

    /// Render `kind` onto a fresh surface of the configured size.
    pub fn render_chart(&self, kind: &str, frame: &Frame) -> Result<DisplayList, RenderError> {
        let mut canvas = DisplayList::new(
            f64::from(self.config.render.width),
            f64::from(self.config.render.height),
        );
        self.renderer.draw(kind, Some(&mut canvas), frame)?;
        Ok(canvas)
    }

    /// Hero redraw driver bound to this site's clock. Honors the
    /// animations preference by starting hidden when animations are off.
    pub fn hero_animation<C: Canvas2d + Send + 'static>(
        &self,
        canvas: Arc<Mutex<C>>,
    ) -> (HeroAnimation<C>, watch::Sender<bool>) {
        let animate = self.preferences.lock().animations_enabled;
        let (visible_tx, visible_rx) = watch::channel(animate);
        let hero = HeroAnimation::new(
            self.renderer.clone(),
            canvas,
            Palette::SITE,
            Arc::clone(&self.clock),
            visible_rx,
        );
        (hero, visible_tx)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::site;
    use super::*;
    use crate::domain::PreferencesPatch;

    #[test]
    fn boot_counts_the_view_and_opens_a_session() {
        let f = site();
        let first = f.site.boot("/about.html");
        assert!(first.new_session);
        assert_eq!(first.page_views, 1);

        let second = f.site.boot("/about.html");
        assert!(!second.new_session);
        assert_eq!(second.page_views, 2);
    }

    #[test]
    fn notifications_follow_the_preference() {
        let f = site();
        assert!(f.site.notify("xin chào"));
        f.site.save_preferences(&PreferencesPatch {
            notifications: Some(false),
            ..PreferencesPatch::default()
        });
        assert!(!f.site.notify("xin chào"));
        assert_eq!(f.events.count("notification"), 1);
    }

    #[test]
    fn renders_charts_at_the_configured_size() {
        let f = site();
        let svg = f.site.render_chart("vision", &Frame::default()).unwrap().to_svg();
        assert!(svg.contains(r#"width="600" height="400""#));
        assert!(matches!(
            f.site.render_chart("nope", &Frame::default()),
            Err(RenderError::UnknownVisualization(_))
        ));
    }

    #[test]
    fn hero_starts_hidden_when_animations_are_off() {
        let f = site();
        f.site.save_preferences(&PreferencesPatch {
            animations_enabled: Some(false),
            ..PreferencesPatch::default()
        });
        let canvas = Arc::new(Mutex::new(DisplayList::new(600.0, 400.0)));
        let (hero, visible) = f.site.hero_animation(canvas);
        assert!(!hero.frame());
        visible.send(true).unwrap();
        assert!(hero.frame());
    }
}
