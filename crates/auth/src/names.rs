//! Splitting a full name into the parts stored on an account.

use serde::{Deserialize, Serialize};

/// Given/family split of a full name, as stored on the account record.
///
/// Purely presentational: the member keeps the full name as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

impl PersonName {
    /// Text before the first space is the given name, the rest is the family
    /// name. Without a space the whole string is the given name.
    pub fn split(full_name: &str) -> Self {
        match full_name.split_once(' ') {
            Some((given, family)) => Self {
                given: given.to_string(),
                family: family.to_string(),
            },
            None => Self {
                given: full_name.to_string(),
                family: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_the_first_space() {
        let name = PersonName::split("Tom Hanks");
        assert_eq!(name.given, "Tom");
        assert_eq!(name.family, "Hanks");
    }

    #[test]
    fn keeps_everything_after_the_first_space_as_family_name() {
        let name = PersonName::split("Mary Ann van der Berg");
        assert_eq!(name.given, "Mary");
        assert_eq!(name.family, "Ann van der Berg");
    }

    #[test]
    fn single_word_has_no_family_name() {
        let name = PersonName::split("Cher");
        assert_eq!(name.given, "Cher");
        assert_eq!(name.family, "");
    }
}
