//! Page effects: navigation state, scroll reveal, stat counters, filter
//! tabs and the FAQ accordion.
//!
//! The host reports positions and clicks; these types only decide what
//! should change on the page.

use std::time::Duration;

use tokio::time::Instant;

use crate::render::{Rect, is_in_viewport};
use crate::validate::{Throttle, format_number};

pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Last path segment, `index.html` for the site root.
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(page) if !page.is_empty() => page,
        _ => "index.html",
    }
}

/// Indices of the nav links pointing at the page being shown.
pub fn active_nav_links(path: &str, hrefs: &[&str]) -> Vec<usize> {
    let page = current_page(path);
    hrefs
        .iter()
        .enumerate()
        .filter(|(_, href)| **href == page)
        .map(|(i, _)| i)
        .collect()
}

/// Mobile menu: the toggle flips it, a click anywhere else closes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn click_outside(&mut self) {
        self.open = false;
    }
}

/// An element carrying `data-animate`, positioned in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTarget {
    pub animation: String,
    pub rect: Rect,
    animated: bool,
}

impl RevealTarget {
    pub fn new(animation: impl Into<String>, rect: Rect) -> Self {
        Self {
            animation: animation.into(),
            rect,
            animated: false,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Classes added once the element has been revealed.
    pub fn classes(&self) -> [String; 2] {
        ["animated".to_string(), format!("animate-{}", self.animation)]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollUpdate {
    /// Header gets its shadow as soon as the page is scrolled at all.
    pub header_scrolled: bool,
    /// Indices of targets revealed by this scroll.
    pub revealed: Vec<usize>,
}

/// Scroll handler state, throttled to roughly one run per frame.
pub struct ScrollEffects {
    throttle: Throttle,
    viewport_width: f64,
    viewport_height: f64,
    targets: Vec<RevealTarget>,
}

impl ScrollEffects {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            throttle: Throttle::new(SCROLL_THROTTLE),
            viewport_width,
            viewport_height,
            targets: Vec::new(),
        }
    }

    pub fn observe(&mut self, target: RevealTarget) -> usize {
        self.targets.push(target);
        self.targets.len() - 1
    }

    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }

    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
    }

    pub fn on_scroll(&mut self, scroll_top: f64) -> Option<ScrollUpdate> {
        self.on_scroll_at(scroll_top, Instant::now())
    }

    /// `None` when throttled.
    pub fn on_scroll_at(&mut self, scroll_top: f64, now: Instant) -> Option<ScrollUpdate> {
        if !self.throttle.ready_at(now) {
            return None;
        }
        let mut update = ScrollUpdate {
            header_scrolled: scroll_top > 0.0,
            revealed: Vec::new(),
        };
        for (index, target) in self.targets.iter_mut().enumerate() {
            if target.animated {
                continue;
            }
            let on_screen = Rect {
                top: target.rect.top - scroll_top,
                bottom: target.rect.bottom - scroll_top,
                ..target.rect
            };
            if is_in_viewport(&on_screen, self.viewport_width, self.viewport_height) {
                target.animated = true;
                update.revealed.push(index);
            }
        }
        if !update.revealed.is_empty() {
            tracing::trace!(count = update.revealed.len(), scroll_top, "elements revealed");
        }
        Some(update)
    }
}

/// Text of a stat counter `elapsed` into its animation (easeOutQuart).
pub fn counter_value(target: i64, elapsed: Duration, duration: Duration) -> String {
    let progress = if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    };
    if progress >= 1.0 {
        return format_number(target);
    }
    let eased = 1.0 - (1.0 - progress).powi(4);
    format_number((target as f64 * eased).floor() as i64)
}

/// Whether an item tagged `category` stays visible under the selected tab.
pub fn filter_matches(selected: &str, category: &str) -> bool {
    selected == "all" || selected == category
}

/// FAQ list where at most one item is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    /// Clicking the open item closes it; any other item opens alone.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return self.open;
        }
        self.open = match self.open {
            Some(current) if current == index => None,
            _ => Some(index),
        };
        self.open
    }
}
