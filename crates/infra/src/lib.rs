//! Infrastructure layer: persistence, configuration and the request-level
//! workflows that combine the pure domain crates with a store.

pub mod attendance;
pub mod config;
pub mod error;
pub mod form;
pub mod queries;
pub mod registration;
pub mod store;


pub use attendance::{AttendanceOutcome, AttendanceReceipt, submit_attendance};
pub use config::{Config, DatabaseConfig};
pub use error::ServiceError;
pub use form::FormRejection;
pub use registration::{RegistrationOutcome, register_member};
pub use store::{ClubStore, InMemoryClubStore, PostgresClubStore, StoreError};
