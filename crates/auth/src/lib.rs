//! Login accounts backing registered members.
//!
//! Decoupled from HTTP and storage: this crate validates registration input,
//! hashes passwords and describes the account record. Persisting it is the
//! infrastructure layer's job.

pub mod account;
pub mod names;
pub mod password;
pub mod registration;

pub use account::{Account, NewAccount};
pub use names::PersonName;
pub use password::{CredentialError, MIN_PASSWORD_LEN, PasswordHash, hash_password};
pub use registration::{RegistrationForm, ValidRegistration};
