//! Form drafts and submission.
//!
//! 入力途中のフォームは `form_<id>` に 24 時間だけ保存され、
//! 送信が通ると削除されます。

use std::collections::BTreeMap;
use std::time::Duration;

use crate::storage::{GetOptions, Scope, SetOptions, keys};
use crate::validate::{Field, FieldKind, FormReport, validate_form};

use super::site::Site;

pub type FormData = BTreeMap<String, String>;

pub const FORM_DRAFT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Name/value pairs the way a form submission would carry them: unchecked
/// checkboxes are left out.
pub fn form_snapshot(fields: &[Field]) -> FormData {
    fields
        .iter()
        .filter(|f| f.kind != FieldKind::Checkbox || f.checked)
        .map(|f| (f.name.clone(), f.value.clone()))
        .collect()
}

impl Site {
    pub fn save_form_data(&self, form_id: &str, data: &FormData) -> bool {
        self.storage().is_some_and(|s| {
            s.set(
                &keys::form(form_id),
                data,
                SetOptions::default().expires_in(FORM_DRAFT_TTL),
            )
        })
    }

    pub fn load_form_data(&self, form_id: &str) -> Option<FormData> {
        let data: FormData = self
            .storage()?
            .get(&keys::form(form_id), GetOptions::default())?;
        tracing::info!(form = form_id, fields = data.len(), "form draft restored");
        Some(data)
    }

    pub fn remove_form_data(&self, form_id: &str) -> bool {
        self.storage()
            .is_some_and(|s| s.remove(&keys::form(form_id), Scope::Durable))
    }

    /// Validate every field. A valid form drops its draft and is counted.
    pub fn submit_form(&self, form_id: &str, fields: &[Field]) -> FormReport {
        let report = validate_form(fields);
        if report.is_valid() {
            self.remove_form_data(form_id);
            self.track_form_submission(form_id);
        } else {
            tracing::debug!(form = form_id, errors = report.errors.len(), "form rejected");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::super::site::test_support::site;
    use super::*;
    use crate::validate::FieldError;

    fn contact_fields(email: &str) -> Vec<Field> {
        vec![
            Field::new("name", FieldKind::Text, "Minh").required(),
            Field::new("email", FieldKind::Email, email).required(),
            Field::new("newsletter", FieldKind::Checkbox, "on"),
            Field::new("terms", FieldKind::Checkbox, "on").required().checked(true),
        ]
    }

    #[test]
    fn snapshot_skips_unchecked_boxes() {
        let data = form_snapshot(&contact_fields("minh@example.vn"));
        assert_eq!(data.get("terms").map(String::as_str), Some("on"));
        assert!(!data.contains_key("newsletter"));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn drafts_expire_after_a_day() {
        let f = site();
        let data = form_snapshot(&contact_fields("minh@"));
        assert!(f.site.save_form_data("contactForm", &data));
        assert_eq!(f.site.load_form_data("contactForm"), Some(data));

        f.clock.advance(FORM_DRAFT_TTL + Duration::from_secs(1));
        assert_eq!(f.site.load_form_data("contactForm"), None);
    }

    #[test]
    fn invalid_submission_keeps_the_draft() {
        let f = site();
        let fields = contact_fields("minh@");
        f.site.save_form_data("contactForm", &form_snapshot(&fields));

        let report = f.site.submit_form("contactForm", &fields);
        assert_eq!(report.error_for("email"), Some(&FieldError::InvalidEmail));
        assert!(f.site.load_form_data("contactForm").is_some());
        assert!(f.site.analytics().interactions.is_empty());
    }

    #[test]
    fn valid_submission_clears_the_draft_and_is_counted() {
        let f = site();
        let fields = contact_fields("minh@example.vn");
        f.site.save_form_data("contactForm", &form_snapshot(&fields));

        assert!(f.site.submit_form("contactForm", &fields).is_valid());
        assert!(f.site.load_form_data("contactForm").is_none());
        assert_eq!(
            f.site.analytics().interactions.get("form_contactForm"),
            Some(&1)
        );
    }
}
