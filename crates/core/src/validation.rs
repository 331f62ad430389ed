//! Field-addressable validation results for HTML forms.
//!
//! Forms validate into `Result<Valid, FormErrors>`. A `FormErrors` value keeps
//! every message keyed by the input it belongs to, plus messages that concern
//! the form as a whole (password mismatch, duplicate email).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::email::Email;

/// All rule violations found while validating one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages attached to `field` (empty when the field is valid).
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    /// `Ok(valid)` when nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, valid: T) -> Result<T, Self> {
        if self.is_empty() { Ok(valid) } else { Err(self) }
    }
}

/// Required text input, trimmed. Records an error and returns `None` when
/// empty or longer than `max_len` characters.
pub fn required_text<'a>(
    errors: &mut FormErrors,
    field: &'static str,
    value: &'a str,
    max_len: usize,
) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }

    let len = trimmed.chars().count();
    if len > max_len {
        errors.add(
            field,
            format!("Ensure this value has at most {max_len} characters (it has {len})."),
        );
        return None;
    }

    Some(trimmed)
}

/// Required secret input. Not trimmed: whitespace is significant in passwords.
pub fn required_secret<'a>(
    errors: &mut FormErrors,
    field: &'static str,
    value: &'a str,
    min_len: usize,
) -> Option<&'a str> {
    if value.is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }

    let len = value.chars().count();
    if len < min_len {
        errors.add(
            field,
            format!("Ensure this value has at least {min_len} characters (it has {len})."),
        );
        return None;
    }

    Some(value)
}

/// Required, well-formed email input.
pub fn required_email(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<Email> {
    if value.trim().is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }

    match Email::parse(value) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.add(field, "Enter a valid email address.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_yield_the_valid_value() {
        assert_eq!(FormErrors::new().into_result(7), Ok(7));
    }

    #[test]
    fn messages_are_grouped_per_field() {
        let mut errors = FormErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");
        errors.add_non_field("whole form");

        assert_eq!(errors.field("email"), ["first", "second"]);
        assert!(errors.field("name").is_empty());
        assert_eq!(errors.non_field(), ["whole form"]);
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn required_text_trims_and_bounds() {
        let mut errors = FormErrors::new();
        assert_eq!(required_text(&mut errors, "name", "  Tom  ", 10), Some("Tom"));
        assert_eq!(required_text(&mut errors, "name", "   ", 10), None);
        assert_eq!(required_text(&mut errors, "location", "x".repeat(11).as_str(), 10), None);

        assert_eq!(errors.field("name"), ["This field is required."]);
        assert_eq!(
            errors.field("location"),
            ["Ensure this value has at most 10 characters (it has 11)."]
        );
    }

    #[test]
    fn required_secret_counts_characters() {
        let mut errors = FormErrors::new();
        assert_eq!(required_secret(&mut errors, "password", "hunter", 8), None);
        assert_eq!(
            errors.field("password"),
            ["Ensure this value has at least 8 characters (it has 6)."]
        );
        assert_eq!(required_secret(&mut errors, "other", "ölbrauer", 8), Some("ölbrauer"));
        assert!(!errors.has_field("other"));
    }

    #[test]
    fn required_email_distinguishes_missing_from_malformed() {
        let mut errors = FormErrors::new();
        assert!(required_email(&mut errors, "a", "").is_none());
        assert!(required_email(&mut errors, "b", "nope").is_none());
        assert!(required_email(&mut errors, "c", "tom@example.com").is_some());

        assert_eq!(errors.field("a"), ["This field is required."]);
        assert_eq!(errors.field("b"), ["Enter a valid email address."]);
        assert!(!errors.has_field("c"));
    }
}
