//! User display preferences and the body attributes they map to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

/// Flat record of display options, persisted as one StoredRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub language: String,
    pub notifications: bool,
    pub auto_save: bool,
    pub font_size: FontSize,
    pub animations_enabled: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: "vi".to_string(),
            notifications: true,
            auto_save: true,
            font_size: FontSize::Medium,
            animations_enabled: true,
        }
    }
}

impl UserPreferences {
    /// Overlay a stored (possibly partial) JSON object on top of the defaults.
    ///
    /// Unknown keys are ignored. A field with an unusable value keeps its
    /// default instead of discarding the whole object.
    pub fn merged_over_defaults(stored: &serde_json::Value) -> Self {
        let mut merged = Self::default();
        let Some(object) = stored.as_object() else {
            return merged;
        };
        for (key, value) in object {
            let mut candidate = match serde_json::to_value(&merged) {
                Ok(serde_json::Value::Object(map)) => map,
                _ => return merged,
            };
            if !candidate.contains_key(key) {
                continue;
            }
            candidate.insert(key.clone(), value.clone());
            if let Ok(next) = serde_json::from_value(serde_json::Value::Object(candidate)) {
                merged = next;
            }
        }
        merged
    }

    pub fn apply(&mut self, patch: &PreferencesPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(auto_save) = patch.auto_save {
            self.auto_save = auto_save;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(animations_enabled) = patch.animations_enabled {
            self.animations_enabled = animations_enabled;
        }
    }

    pub fn body_attributes(&self) -> BodyAttributes {
        BodyAttributes {
            data_theme: self.theme.as_str().to_string(),
            data_font_size: self.font_size.as_str().to_string(),
            no_animations: !self.animations_enabled,
        }
    }
}

/// Partial update for [`UserPreferences`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub notifications: Option<bool>,
    pub auto_save: Option<bool>,
    pub font_size: Option<FontSize>,
    pub animations_enabled: Option<bool>,
}

impl PreferencesPatch {
    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Self::default()
        }
    }
}

/// What the page body reflects: `data-theme`, `data-font-size` and the
/// `no-animations` class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyAttributes {
    pub data_theme: String,
    pub data_font_size: String,
    pub no_animations: bool,
}

impl Default for BodyAttributes {
    fn default() -> Self {
        UserPreferences::default().body_attributes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_the_site() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.language, "vi");
        assert_eq!(prefs.font_size, FontSize::Medium);
        assert!(prefs.notifications && prefs.auto_save && prefs.animations_enabled);
    }

    #[test]
    fn partial_object_is_merged_over_defaults() {
        let prefs = UserPreferences::merged_over_defaults(&json!({"theme": "dark", "fontSize": "large"}));
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.font_size, FontSize::Large);
        assert_eq!(prefs.language, "vi");
    }

    #[test]
    fn bad_field_keeps_its_default_only() {
        let prefs = UserPreferences::merged_over_defaults(&json!({"theme": "neon", "notifications": false}));
        assert_eq!(prefs.theme, Theme::Light);
        assert!(!prefs.notifications);
    }

    #[test]
    fn non_object_falls_back_to_defaults() {
        assert_eq!(UserPreferences::merged_over_defaults(&json!([1, 2])), UserPreferences::default());
    }

    #[test]
    fn body_attributes_follow_preferences() {
        let mut prefs = UserPreferences::default();
        prefs.apply(&PreferencesPatch {
            theme: Some(Theme::Dark),
            animations_enabled: Some(false),
            ..PreferencesPatch::default()
        });
        let body = prefs.body_attributes();
        assert_eq!(body.data_theme, "dark");
        assert_eq!(body.data_font_size, "medium");
        assert!(body.no_animations);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&UserPreferences::default()).unwrap();
        assert!(json.contains("animationsEnabled"), "got {json}");
        assert!(json.contains("\"theme\":\"light\""), "got {json}");
    }
}
