//! Shared pieces of form validation.

use serde::Serialize;

/// A form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Whether `value` has at least `min` characters once trimmed.
#[must_use]
pub fn min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}
