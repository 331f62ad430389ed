//! Persistence boundary for events, members, attendance and accounts.
//!
//! Compound writes (find-or-create member plus attendance, account plus
//! member) are single operations on the trait so every implementation can run
//! them atomically.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryClubStore;
pub use postgres::PostgresClubStore;
pub use r#trait::{AttendanceRecord, ClubStore, StoreError};
