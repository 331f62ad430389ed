//! Email address value object.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Longest address accepted (RFC 5321 path limit minus the angle brackets).
pub const MAX_EMAIL_LEN: usize = 254;

static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+)*$")
        .expect("local part pattern is valid")
});

static DOMAIN_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$")
        .expect("domain pattern is valid")
});

/// A syntactically valid email address.
///
/// Surrounding whitespace is stripped; the address is otherwise kept exactly
/// as entered, since member lookup matches on the exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_EMAIL_LEN {
            return Err(DomainError::validation("Enter a valid email address."));
        }

        let Some((local, domain)) = trimmed.rsplit_once('@') else {
            return Err(DomainError::validation("Enter a valid email address."));
        };

        if !LOCAL_PART.is_match(local) || !DOMAIN_PART.is_match(domain) {
            return Err(DomainError::validation("Enter a valid email address."));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ValueObject for Email {}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        for raw in [
            "tom.hanks@example.com",
            "test.user+beer@mail.example.co.uk",
            "o'brien@brew-pub.ie",
        ] {
            assert!(Email::parse(raw).is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let email = Email::parse("  tom@example.com \n").unwrap();
        assert_eq!(email.as_str(), "tom@example.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "",
            "   ",
            "tom",
            "tom@",
            "@example.com",
            "tom@example",
            "tom..hanks@example.com",
            "tom hanks@example.com",
            "tom@-example.com",
        ] {
            assert!(
                matches!(Email::parse(raw), Err(DomainError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_addresses() {
        let raw = format!("{}@example.com", "a".repeat(MAX_EMAIL_LEN));
        assert!(Email::parse(&raw).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a well-formed address parses, is stored trimmed and
            /// re-parses from its display form to an equal value.
            #[test]
            fn well_formed_addresses_round_trip_through_display(
                local in "[a-z0-9]{1,16}(\\.[a-z0-9+_-]{1,8}){0,2}",
                host in "[a-z0-9]{1,12}",
                tld in "[a-z]{2,6}",
                padding in "[ \t\n]{0,3}",
            ) {
                let address = format!("{local}@{host}.{tld}");
                let raw = format!("{padding}{address}{padding}");

                let email = Email::parse(&raw).unwrap();
                prop_assert_eq!(email.as_str(), address.as_str());

                let reparsed = Email::parse(&email.to_string()).unwrap();
                prop_assert_eq!(reparsed, email);
            }

            /// Property: input without an `@` is never accepted.
            #[test]
            fn addresses_without_at_sign_are_rejected(raw in "[a-z0-9. ]{0,40}") {
                prop_assert!(Email::parse(&raw).is_err());
            }
        }
    }
}
