//! Logical key names shared by the features built on storage.

pub const PROBE_KEY: &str = "__storage_test__";

pub const USER_PREFERENCES: &str = "user_preferences";
pub const THEME: &str = "theme";

pub const PAGE_VIEWS: &str = "page_views";
pub const INTERACTIONS: &str = "interactions";
pub const SESSION_COUNT: &str = "session_count";

// session scope
pub const SESSION_ID: &str = "session_id";
pub const SESSION_START: &str = "session_start";
pub const LAST_ACTIVITY: &str = "last_activity";

pub const SEARCH_HISTORY: &str = "search_history";
pub const FAVORITES: &str = "favorites";
pub const BOOKMARKS: &str = "bookmarks";

pub fn form(form_id: &str) -> String {
    format!("form_{form_id}")
}
