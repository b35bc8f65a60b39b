//! Search history, favorites and bookmarks, plus whole-store export/import.

use serde::{Deserialize, Serialize};

use crate::domain::StorageError;
use crate::storage::{ExportBundle, GetOptions, Scope, SetOptions, keys};

use super::site::Site;

pub const SEARCH_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    /// Milliseconds since the epoch.
    pub added_at: i64,
}

/// What the page knows about an item before it is favorited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteItem {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Creation time in milliseconds, doubling as the id.
    pub id: i64,
    pub title: String,
    pub url: String,
    pub added_at: i64,
}

impl Site {
    /// Record `query` at the front of the history, without duplicates.
    pub fn save_search_query(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        let Some(storage) = self.storage() else {
            return Vec::new();
        };
        let mut history = self.search_history();
        if query.is_empty() {
            return history;
        }
        history.retain(|q| q != query);
        history.insert(0, query.to_string());
        history.truncate(SEARCH_HISTORY_LIMIT);
        storage.set(keys::SEARCH_HISTORY, &history, SetOptions::default());
        history
    }

    pub fn search_history(&self) -> Vec<String> {
        self.storage()
            .and_then(|s| s.get(keys::SEARCH_HISTORY, GetOptions::default()))
            .unwrap_or_default()
    }

    pub fn clear_search_history(&self) -> bool {
        self.storage()
            .is_some_and(|s| s.remove(keys::SEARCH_HISTORY, Scope::Durable))
    }

    /// Returns false when an item with the same id is already a favorite.
    pub fn add_favorite(&self, item: FavoriteItem) -> bool {
        let Some(storage) = self.storage() else {
            return false;
        };
        let mut favorites = self.favorites();
        if favorites.iter().any(|f| f.id == item.id) {
            return false;
        }
        favorites.push(Favorite {
            id: item.id,
            title: item.title,
            kind: item.kind,
            url: item.url,
            added_at: self.clock.now_ms(),
        });
        let saved = storage.set(keys::FAVORITES, &favorites, SetOptions::default());
        if saved {
            self.notify("Đã thêm vào danh sách yêu thích");
        }
        saved
    }

    pub fn remove_favorite(&self, id: &str) -> bool {
        let Some(storage) = self.storage() else {
            return false;
        };
        let mut favorites = self.favorites();
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() == before {
            return false;
        }
        let saved = storage.set(keys::FAVORITES, &favorites, SetOptions::default());
        if saved {
            self.notify("Đã xóa khỏi danh sách yêu thích");
        }
        saved
    }

    pub fn favorites(&self) -> Vec<Favorite> {
        self.storage()
            .and_then(|s| s.get(keys::FAVORITES, GetOptions::default()))
            .unwrap_or_default()
    }

    pub fn add_bookmark(&self, title: &str, url: &str) -> Option<Bookmark> {
        let storage = self.storage()?;
        let now = self.clock.now_ms();
        let bookmark = Bookmark {
            id: now,
            title: title.to_string(),
            url: url.to_string(),
            added_at: now,
        };
        let mut bookmarks = self.bookmarks();
        bookmarks.push(bookmark.clone());
        if !storage.set(keys::BOOKMARKS, &bookmarks, SetOptions::default()) {
            return None;
        }
        self.notify("Đã thêm bookmark");
        Some(bookmark)
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.storage()
            .and_then(|s| s.get(keys::BOOKMARKS, GetOptions::default()))
            .unwrap_or_default()
    }

    pub fn export_data(&self) -> Result<ExportBundle, StorageError> {
        self.storage()
            .ok_or_else(|| StorageError::Unavailable("storage disabled".to_string()))?
            .export_data()
    }

    /// Import an exported object, then reload preferences from it.
    pub fn import_data(&self, raw: &str) -> Result<usize, StorageError> {
        let imported = self
            .storage()
            .ok_or_else(|| StorageError::Unavailable("storage disabled".to_string()))?
            .import_data(raw)?;
        self.load_preferences();
        self.notify("Dữ liệu đã được import thành công");
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::super::site::test_support::{site, site_with};
    use super::*;
    use crate::domain::{PreferencesPatch, Theme};
    use crate::impls::InMemoryStore;

    fn item(id: &str) -> FavoriteItem {
        FavoriteItem {
            id: id.to_string(),
            title: format!("Bài viết {id}"),
            kind: "blog".to_string(),
            url: format!("/blog/{id}.html"),
        }
    }

    #[test]
    fn search_history_is_most_recent_first_and_capped() {
        let f = site();
        for i in 0..12 {
            f.site.save_search_query(&format!("q{i}"));
        }
        f.site.save_search_query("q5");
        f.site.save_search_query("   ");

        let history = f.site.search_history();
        assert_eq!(history.len(), SEARCH_HISTORY_LIMIT);
        assert_eq!(history[0], "q5");
        assert_eq!(history[1], "q11");
        assert_eq!(history.iter().filter(|q| *q == "q5").count(), 1);
        assert!(!history.contains(&"q0".to_string()));

        assert!(f.site.clear_search_history());
        assert!(f.site.search_history().is_empty());
    }

    #[test]
    fn favorites_are_unique_by_id() {
        let f = site();
        assert!(f.site.add_favorite(item("a")));
        assert!(!f.site.add_favorite(item("a")));
        assert!(f.site.add_favorite(item("b")));
        assert_eq!(f.site.favorites().len(), 2);

        assert!(f.site.remove_favorite("a"));
        assert!(!f.site.remove_favorite("a"));
        let ids: Vec<_> = f.site.favorites().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["b"]);
        assert_eq!(f.events.count("notification"), 3);
    }

    #[test]
    fn favorite_serializes_kind_as_type() {
        let value = serde_json::to_value(Favorite {
            id: "x".into(),
            title: "X".into(),
            kind: "service".into(),
            url: "/x".into(),
            added_at: 1,
        })
        .unwrap();
        assert_eq!(value["type"], "service");
        assert_eq!(value["addedAt"], 1);
    }

    #[test]
    fn bookmarks_are_stamped_with_the_clock() {
        let f = site();
        let first = f.site.add_bookmark("Trang chủ", "/").unwrap();
        f.clock.advance(Duration::from_millis(10));
        let second = f.site.add_bookmark("Blog", "/blog.html").unwrap();

        assert_eq!(second.id - first.id, 10);
        assert_eq!(f.site.bookmarks(), vec![first, second]);
    }

    #[test]
    fn import_reloads_preferences() {
        let source = site();
        source.site.save_preferences(&PreferencesPatch::theme(Theme::Dark));
        let json = source.site.export_data().unwrap().to_json_pretty().unwrap();

        let target = site_with(Arc::new(InMemoryStore::new()));
        assert_eq!(target.site.preferences().theme, Theme::Light);
        assert!(target.site.import_data(&json).unwrap() >= 2);
        assert_eq!(target.site.preferences().theme, Theme::Dark);
        assert_eq!(target.site.body().data_theme, "dark");
    }

    #[test]
    fn collections_degrade_without_storage() {
        let f = site_with(Arc::new(InMemoryStore::unavailable()));
        assert!(f.site.save_search_query("seo").is_empty());
        assert!(!f.site.add_favorite(item("a")));
        assert!(f.site.add_bookmark("x", "/x").is_none());
        assert!(matches!(f.site.export_data(), Err(StorageError::Unavailable(_))));
        assert!(matches!(f.site.import_data("{}"), Err(StorageError::Unavailable(_))));
    }
}
