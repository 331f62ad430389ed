//! Club members, keyed by email address.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bierklub_core::{AccountId, Email, MemberId};

/// Longest full name accepted from any form.
pub const MAX_MEMBER_NAME_LEN: usize = 200;

/// A person who attends club events.
///
/// Members created by an RSVP carry only a name and an email; members created
/// by registration are linked to a login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub account_id: Option<AccountId>,
}

impl core::fmt::Display for Member {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A member about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub email: Email,
    pub join_date: NaiveDate,
}

impl NewMember {
    pub fn into_member(self, id: MemberId, account_id: Option<AccountId>) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email.into_inner(),
            join_date: self.join_date,
            account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_name_and_address() {
        let member = NewMember {
            name: "Tom Hanks".to_string(),
            email: Email::parse("tom.hanks@example.com").unwrap(),
            join_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
        .into_member(MemberId::new(), None);

        assert_eq!(member.to_string(), "Tom Hanks <tom.hanks@example.com>");
        assert_eq!(member.account_id, None);
    }
}
