//! RSVP form.

use serde::{Deserialize, Serialize};

use bierklub_core::validation::{required_email, required_text};
use bierklub_core::{Email, FormErrors};

use crate::member::MAX_MEMBER_NAME_LEN;

/// Raw RSVP input exactly as submitted. Missing inputs deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceForm {
    pub name: String,
    pub email: String,
}

/// RSVP input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAttendance {
    pub name: String,
    pub email: Email,
}

impl AttendanceForm {
    pub fn validate(&self) -> Result<ValidAttendance, FormErrors> {
        let mut errors = FormErrors::new();
        let name = required_text(&mut errors, "name", &self.name, MAX_MEMBER_NAME_LEN);
        let email = required_email(&mut errors, "email", &self.email);

        match (name, email) {
            (Some(name), Some(email)) => errors.into_result(ValidAttendance {
                name: name.to_string(),
                email,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str) -> AttendanceForm {
        AttendanceForm {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn accepts_name_and_email() {
        let valid = form(" Tom Hanks ", "tom.hanks@example.com").validate().unwrap();
        assert_eq!(valid.name, "Tom Hanks");
        assert_eq!(valid.email.as_str(), "tom.hanks@example.com");
    }

    #[test]
    fn missing_name_is_reported_on_the_name_field() {
        let errors = form("", "testuser@example.com").validate().unwrap_err();
        assert_eq!(errors.field("name"), ["This field is required."]);
        assert!(!errors.has_field("email"));
    }

    #[test]
    fn missing_email_is_reported_on_the_email_field() {
        let errors = form("Test User", "").validate().unwrap_err();
        assert_eq!(errors.field("email"), ["This field is required."]);
        assert!(!errors.has_field("name"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors = form("Test User", "not-an-address").validate().unwrap_err();
        assert_eq!(errors.field("email"), ["Enter a valid email address."]);
    }
}
