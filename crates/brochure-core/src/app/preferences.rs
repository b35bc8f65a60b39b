//! User preferences: load, save and reflect them on the page body.
//!
//! The stored `user_preferences` object is merged over the defaults; a
//! standalone `theme` entry, when present, wins over the theme inside it.

use crate::domain::{BodyAttributes, PreferencesPatch, Theme, UserPreferences};
use crate::storage::{ChangeRoute, GetOptions, SetOptions, keys};

use super::site::Site;

impl Site {
    pub fn preferences(&self) -> UserPreferences {
        self.preferences.lock().clone()
    }

    /// Attributes the page body currently carries.
    pub fn body(&self) -> BodyAttributes {
        self.body.lock().clone()
    }

    pub fn load_preferences(&self) -> UserPreferences {
        let mut prefs = self
            .storage()
            .and_then(|s| s.get::<serde_json::Value>(keys::USER_PREFERENCES, GetOptions::default()))
            .map(|stored| UserPreferences::merged_over_defaults(&stored))
            .unwrap_or_default();
        if let Some(theme) = self
            .storage()
            .and_then(|s| s.get::<Theme>(keys::THEME, GetOptions::default()))
        {
            prefs.theme = theme;
        }

        *self.preferences.lock() = prefs.clone();
        self.apply_preferences(&prefs);
        prefs
    }

    /// Merge `patch` into the current preferences, persist and apply them.
    pub fn save_preferences(&self, patch: &PreferencesPatch) -> UserPreferences {
        let prefs = {
            let mut current = self.preferences.lock();
            current.apply(patch);
            current.clone()
        };

        if let Some(storage) = self.storage() {
            let saved = storage.set(keys::USER_PREFERENCES, &prefs, SetOptions::default())
                && storage.set(keys::THEME, &prefs.theme, SetOptions::default());
            if !saved {
                tracing::warn!("preferences applied but not persisted");
            }
        }
        self.apply_preferences(&prefs);
        prefs
    }

    fn apply_preferences(&self, prefs: &UserPreferences) {
        let attributes = prefs.body_attributes();
        tracing::debug!(
            theme = %attributes.data_theme,
            font_size = %attributes.data_font_size,
            no_animations = attributes.no_animations,
            "preferences applied"
        );
        *self.body.lock() = attributes;
    }

    /// Re-read the standalone theme entry (light when absent).
    pub fn apply_theme_change(&self) -> Theme {
        let theme = self
            .storage()
            .and_then(|s| s.get::<Theme>(keys::THEME, GetOptions::default()))
            .unwrap_or_default();
        self.preferences.lock().theme = theme;
        self.body.lock().data_theme = theme.as_str().to_string();
        theme
    }

    /// Another tab changed `full_key`; reload whatever depends on it.
    pub fn handle_external_change(
        &self,
        full_key: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> ChangeRoute {
        let Some(storage) = self.storage() else {
            return ChangeRoute::Ignore;
        };
        let route = storage.on_external_change(full_key, old_value, new_value);
        match route {
            ChangeRoute::ReloadPreferences => {
                self.load_preferences();
            }
            ChangeRoute::ApplyTheme => {
                self.apply_theme_change();
            }
            ChangeRoute::Ignore => {}
        }
        route
    }
}
