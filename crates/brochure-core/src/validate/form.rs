//! Form field validation.
//!
//! Rules are checked in order and the first failure wins: required, then
//! email format, then phone format, then checkbox consent.

use thiserror::Error;

use super::contact::{is_valid_email, is_valid_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    /// Only meaningful for checkboxes.
    pub checked: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            required: false,
            checked: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Trường này là bắt buộc")]
    Required,

    #[error("Vui lòng nhập email hợp lệ")]
    InvalidEmail,

    #[error("Vui lòng nhập số điện thoại hợp lệ")]
    InvalidPhone,

    #[error("Vui lòng đồng ý với điều khoản")]
    ConsentRequired,
}

pub fn validate_field(field: &Field) -> Result<(), FieldError> {
    let value = field.value.trim();

    if field.kind == FieldKind::Checkbox {
        if field.required && !field.checked {
            return Err(FieldError::ConsentRequired);
        }
        return Ok(());
    }

    if field.required && value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.is_empty() {
        return Ok(());
    }
    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Result of checking a whole form; every field is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    pub errors: Vec<(String, FieldError)>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }
}

pub fn validate_form(fields: &[Field]) -> FormReport {
    let errors = fields
        .iter()
        .filter_map(|f| validate_field(f).err().map(|e| (f.name.clone(), e)))
        .collect();
    FormReport { errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_beats_format_checks() {
        let field = Field::new("email", FieldKind::Email, "   ").required();
        assert_eq!(validate_field(&field), Err(FieldError::Required));
    }

    #[test]
    fn optional_empty_fields_pass() {
        assert!(validate_field(&Field::new("phone", FieldKind::Tel, "")).is_ok());
    }

    #[test]
    fn format_errors_carry_user_messages() {
        let err = validate_field(&Field::new("email", FieldKind::Email, "nope")).unwrap_err();
        assert_eq!(err.to_string(), "Vui lòng nhập email hợp lệ");

        let err = validate_field(&Field::new("phone", FieldKind::Tel, "12345")).unwrap_err();
        assert_eq!(err, FieldError::InvalidPhone);
    }

    #[test]
    fn required_checkbox_needs_to_be_checked() {
        let consent = Field::new("terms", FieldKind::Checkbox, "on").required();
        assert_eq!(validate_field(&consent), Err(FieldError::ConsentRequired));
        assert!(validate_field(&consent.checked(true)).is_ok());
    }

    #[test]
    fn form_report_collects_every_failure() {
        let report = validate_form(&[
            Field::new("name", FieldKind::Text, "Lan").required(),
            Field::new("email", FieldKind::Email, "").required(),
            Field::new("phone", FieldKind::Tel, "abc"),
        ]);

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.error_for("email"), Some(&FieldError::Required));
        assert_eq!(report.error_for("phone"), Some(&FieldError::InvalidPhone));
        assert_eq!(report.error_for("name"), None);
    }
}
