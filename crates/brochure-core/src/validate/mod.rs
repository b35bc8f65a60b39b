//! Formatter and validator utilities. Stateless apart from the timers.

pub mod contact;
pub mod form;
pub mod format;
pub mod timing;

pub use self::contact::{is_valid_email, is_valid_phone};
pub use self::form::{Field, FieldError, FieldKind, FormReport, validate_field, validate_form};
pub use self::format::{format_bytes, format_number};
pub use self::timing::{Debouncer, Throttle};
