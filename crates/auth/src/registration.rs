//! Member sign-up form.

use serde::{Deserialize, Serialize};

use bierklub_core::validation::{required_email, required_secret, required_text};
use bierklub_core::{Email, FormErrors};

use crate::password::MIN_PASSWORD_LEN;

/// Longest full name accepted at sign-up.
pub const MAX_FULL_NAME_LEN: usize = 200;

pub const PASSWORD_MISMATCH: &str = "Your passwords do not match!";
pub const DUPLICATE_EMAIL: &str = "A user with this email already exists!";

/// Raw sign-up input exactly as submitted. Missing inputs deserialize as empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl core::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

/// Sign-up input that passed every rule that needs no storage lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub email: Email,
    pub full_name: String,
    pub password: String,
}

impl core::fmt::Debug for ValidRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValidRegistration")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Field rules plus the password match rule, all reported together.
    ///
    /// On failure the parsed email (if it was well-formed) is returned along
    /// with the errors so the caller can still run the duplicate check.
    pub fn validate(&self) -> Result<ValidRegistration, (FormErrors, Option<Email>)> {
        let mut errors = FormErrors::new();
        let email = required_email(&mut errors, "email", &self.email);
        let full_name = required_text(&mut errors, "full_name", &self.full_name, MAX_FULL_NAME_LEN);
        let password = required_secret(&mut errors, "password", &self.password, MIN_PASSWORD_LEN);
        required_secret(
            &mut errors,
            "confirm_password",
            &self.confirm_password,
            MIN_PASSWORD_LEN,
        );

        if self.password != self.confirm_password {
            errors.add_non_field(PASSWORD_MISMATCH);
        }

        match (email, full_name, password) {
            (Some(email), Some(full_name), Some(password)) if errors.is_empty() => {
                Ok(ValidRegistration {
                    email,
                    full_name: full_name.to_string(),
                    password: password.to_string(),
                })
            }
            (email, _, _) => Err((errors, email)),
        }
    }

    /// Copy safe to echo back into a re-rendered form: passwords blanked.
    pub fn redacted(&self) -> Self {
        Self {
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, full_name: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            email: email.to_string(),
            full_name: full_name.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_submission() {
        let valid = form("tom.hanks@example.com", "Tom Hanks", "password", "password")
            .validate()
            .unwrap();
        assert_eq!(valid.email.as_str(), "tom.hanks@example.com");
        assert_eq!(valid.full_name, "Tom Hanks");
        assert_eq!(valid.password, "password");
    }

    #[test]
    fn short_password_is_a_password_field_error() {
        let (errors, email) = form("tom@example.com", "Tom", "short", "short")
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.field("password"),
            ["Ensure this value has at least 8 characters (it has 5)."]
        );
        assert!(errors.non_field().is_empty());
        assert!(email.is_some());
    }

    #[test]
    fn mismatch_is_a_form_level_error() {
        let (errors, _) = form("tom@example.com", "Tom", "password1", "password2")
            .validate()
            .unwrap_err();
        assert_eq!(errors.non_field(), [PASSWORD_MISMATCH]);
        assert!(!errors.has_field("password"));
    }

    #[test]
    fn all_problems_are_reported_at_once() {
        let (errors, email) = form("nope", "", "abc", "").validate().unwrap_err();
        assert!(errors.has_field("email"));
        assert!(errors.has_field("full_name"));
        assert!(errors.has_field("password"));
        assert!(errors.has_field("confirm_password"));
        assert_eq!(errors.non_field(), [PASSWORD_MISMATCH]);
        assert!(email.is_none());
    }

    #[test]
    fn redacted_copy_drops_passwords() {
        let redacted = form("tom@example.com", "Tom", "password", "password").redacted();
        assert_eq!(redacted.email, "tom@example.com");
        assert_eq!(redacted.full_name, "Tom");
        assert!(redacted.password.is_empty());
        assert!(redacted.confirm_password.is_empty());
    }

    #[test]
    fn debug_output_never_contains_passwords() {
        let rendered = format!("{:?}", form("tom@example.com", "Tom", "s3cret-pw", "s3cret-pw"));
        assert!(!rendered.contains("s3cret-pw"));
    }
}
