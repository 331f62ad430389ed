//! Login accounts created by member registration.

use chrono::{DateTime, Utc};

use bierklub_core::{AccountId, Email};

use crate::names::PersonName;
use crate::password::PasswordHash;

/// Login account of a registered member. The email doubles as username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

/// An account about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: Email,
    pub name: PersonName,
    pub password_hash: PasswordHash,
}

impl NewAccount {
    pub fn into_account(self, id: AccountId, created_at: DateTime<Utc>) -> Account {
        let email = self.email.into_inner();
        Account {
            id,
            username: email.clone(),
            email,
            given_name: self.name.given,
            family_name: self.name.family,
            password_hash: self.password_hash,
            created_at,
        }
    }
}
