//! Local usage tracking: page views, sessions and interactions.
//!
//! Everything lives in the site's own storage; nothing is sent anywhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::UserPreferences;
use crate::storage::{GetOptions, SetOptions, keys};

use super::site::Site;

/// Per-path view counters plus the time of the latest view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViews {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<i64>,
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub page_views: PageViews,
    pub session_count: u64,
    pub interactions: BTreeMap<String, u64>,
    pub last_activity: Option<i64>,
    pub user_preferences: UserPreferences,
}

impl Site {
    /// Count a view of `path`. Returns the new count (0 without storage).
    pub fn track_page_view(&self, path: &str) -> u64 {
        let Some(storage) = self.storage() else {
            return 0;
        };
        let mut views: PageViews = storage
            .get(keys::PAGE_VIEWS, GetOptions::default())
            .unwrap_or_default();
        let count = views.counts.entry(path.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        views.last_visit = Some(self.clock.now_ms());
        storage.set(keys::PAGE_VIEWS, &views, SetOptions::default());
        count
    }

    /// Start a session on first call in this browsing session; always
    /// refreshes `last_activity`. Returns true when a session was started.
    pub fn track_session(&self) -> bool {
        let Some(storage) = self.storage() else {
            return false;
        };
        let now = self.clock.now_ms();
        let existing: Option<String> = storage.get(keys::SESSION_ID, GetOptions::session());
        let started = existing.is_none();

        if started {
            let id = self.ids.generate_session_id();
            storage.set(keys::SESSION_ID, &id.to_string(), SetOptions::session());
            storage.set(keys::SESSION_START, &now, SetOptions::session());
            let count: u64 = storage
                .get(keys::SESSION_COUNT, GetOptions::default())
                .unwrap_or(0);
            storage.set(keys::SESSION_COUNT, &(count + 1), SetOptions::default());
            tracing::info!(session = %id, count = count + 1, "session started");
        }

        storage.set(keys::LAST_ACTIVITY, &now, SetOptions::session());
        started
    }

    /// Count a click on a control labelled `label`.
    pub fn track_interaction(&self, label: &str) -> u64 {
        let label = label.trim();
        self.bump_interaction(if label.is_empty() { "unknown" } else { label })
    }

    pub fn track_form_submission(&self, form_id: &str) -> u64 {
        let form_id = if form_id.is_empty() { "unknown_form" } else { form_id };
        self.bump_interaction(&keys::form(form_id))
    }

    fn bump_interaction(&self, key: &str) -> u64 {
        let Some(storage) = self.storage() else {
            return 0;
        };
        let mut interactions: BTreeMap<String, u64> = storage
            .get(keys::INTERACTIONS, GetOptions::default())
            .unwrap_or_default();
        let count = interactions.entry(key.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        storage.set(keys::INTERACTIONS, &interactions, SetOptions::default());
        count
    }

    pub fn analytics(&self) -> AnalyticsSummary {
        let storage = self.storage();
        AnalyticsSummary {
            page_views: storage
                .and_then(|s| s.get(keys::PAGE_VIEWS, GetOptions::default()))
                .unwrap_or_default(),
            session_count: storage
                .and_then(|s| s.get(keys::SESSION_COUNT, GetOptions::default()))
                .unwrap_or(0),
            interactions: storage
                .and_then(|s| s.get(keys::INTERACTIONS, GetOptions::default()))
                .unwrap_or_default(),
            last_activity: storage.and_then(|s| s.get(keys::LAST_ACTIVITY, GetOptions::session())),
            user_preferences: self.preferences(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::super::site::test_support::{site, site_with};
    use super::*;
    use crate::impls::InMemoryStore;
    use crate::ports::Clock;

    #[test]
    fn page_views_count_per_path_and_stamp_last_visit() {
        let f = site();
        assert_eq!(f.site.track_page_view("/"), 1);
        f.clock.advance(Duration::from_secs(5));
        assert_eq!(f.site.track_page_view("/"), 2);
        assert_eq!(f.site.track_page_view("/blog.html"), 1);

        let views = f.site.analytics().page_views;
        assert_eq!(views.counts.get("/"), Some(&2));
        assert_eq!(views.last_visit, Some(f.clock.now_ms()));
    }

    #[test]
    fn page_views_round_trip_the_flat_layout() {
        let raw = serde_json::json!({"/": 3, "/about.html": 1, "lastVisit": 42});
        let views: PageViews = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(views.last_visit, Some(42));
        assert_eq!(views.counts.len(), 2);
        assert_eq!(serde_json::to_value(&views).unwrap(), raw);
    }

    #[test]
    fn session_count_grows_once_per_browsing_session() {
        let durable = Arc::new(InMemoryStore::new());
        let first = site_with(durable.clone());
        assert!(first.site.track_session());
        assert!(!first.site.track_session());
        assert_eq!(first.site.analytics().session_count, 1);

        // a new browsing session gets a fresh session store
        let second = site_with(durable);
        assert!(second.site.track_session());
        assert_eq!(second.site.analytics().session_count, 2);
        assert!(second.site.analytics().last_activity.is_some());
    }

    #[test]
    fn interactions_and_form_submissions_share_one_counter_map() {
        let f = site();
        f.site.track_interaction("  Liên hệ ");
        f.site.track_interaction("Liên hệ");
        f.site.track_interaction("   ");
        f.site.track_form_submission("contactForm");
        f.site.track_form_submission("");

        let interactions = f.site.analytics().interactions;
        assert_eq!(interactions.get("Liên hệ"), Some(&2));
        assert_eq!(interactions.get("unknown"), Some(&1));
        assert_eq!(interactions.get("form_contactForm"), Some(&1));
        assert_eq!(interactions.get("form_unknown_form"), Some(&1));
    }
}
