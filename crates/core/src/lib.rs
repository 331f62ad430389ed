//! Shared building blocks for the club domain.
//!
//! Identifiers, the domain error model, and the small validation toolkit the
//! forms are built from. No IO lives here.

pub mod email;
pub mod error;
pub mod id;
pub mod validation;
pub mod value_object;

pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, EventId, MemberId};
pub use validation::FormErrors;
pub use value_object::ValueObject;
