//! Field rules for the contact form. Pure; never performs I/O.

use std::sync::LazyLock;

use regex::Regex;
use shared::domain::{ContactField, ContactFields, FieldErrors};

pub const NAME_MIN_CHARS: usize = 2;
pub const PHONE_MIN_CHARS: usize = 10;
pub const MESSAGE_MIN_CHARS: usize = 10;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const PHONE_INVALID: &str = "Please enter a valid phone number";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters.";

/// Local part, `@`, then one or more dot-terminated labels and an alphabetic TLD.
/// Leading dots and `..` in the local part are rejected separately. ASCII
/// classes only: `(?i)` would also fold U+212A and U+017F onto `k` and `s`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern compiles")
});

pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Message for `field` if `value` breaks its rule.
pub fn check_field(field: ContactField, value: &str) -> Option<&'static str> {
    let ok = match field {
        ContactField::Name => has_min_chars(value, NAME_MIN_CHARS),
        ContactField::Email => is_valid_email(value),
        ContactField::Phone => has_min_chars(value, PHONE_MIN_CHARS),
        ContactField::Message => has_min_chars(value, MESSAGE_MIN_CHARS),
    };
    if ok {
        None
    } else {
        Some(match field {
            ContactField::Name => NAME_TOO_SHORT,
            ContactField::Email => EMAIL_INVALID,
            ContactField::Phone => PHONE_INVALID,
            ContactField::Message => MESSAGE_TOO_SHORT,
        })
    }
}

pub fn validate(fields: &ContactFields) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in ContactField::ALL {
        if let Some(message) = check_field(field, fields.get(field)) {
            errors.insert(field, message);
        }
    }
    errors
}
