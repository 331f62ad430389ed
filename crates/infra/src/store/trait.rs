use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use bierklub_auth::{Account, NewAccount};
use bierklub_club::{Event, Member, NewEvent, NewMember};
use bierklub_core::{Email, EventId, MemberId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (duplicate email, ...).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Anything else: connectivity, pool exhaustion, corrupt rows.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result of recording one RSVP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub member: Member,
    /// A new member was created for the submitted email.
    pub member_created: bool,
    /// The member was already on the event's attendee list.
    pub already_attending: bool,
}

#[async_trait]
pub trait ClubStore: Send + Sync {
    /// Persist an event from the authoring process.
    async fn create_event(&self, event: NewEvent, now: DateTime<Utc>)
    -> Result<Event, StoreError>;

    /// Events with `published_date <= now`, newest publish first (ties by id
    /// descending), at most `limit`.
    async fn list_published_events(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, StoreError>;

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError>;

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, StoreError>;

    /// Exact match on the stored address.
    async fn find_member_by_email(&self, email: &Email) -> Result<Option<Member>, StoreError>;

    /// Members attending `event_id`, ordered by name.
    async fn attendees(&self, event_id: EventId) -> Result<Vec<Member>, StoreError>;

    /// Find the member holding `attendee.email` (creating it from `attendee`
    /// when absent) and add it to the event's attendees, atomically.
    ///
    /// An existing member keeps its stored name.
    async fn record_attendance(
        &self,
        event_id: EventId,
        attendee: NewMember,
    ) -> Result<AttendanceRecord, StoreError>;

    async fn find_account_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError>;

    /// Create an account and its linked member atomically.
    ///
    /// Fails with `Conflict` when either email is already taken.
    async fn register_member(
        &self,
        account: NewAccount,
        member: NewMember,
        now: DateTime<Utc>,
    ) -> Result<(Account, Member), StoreError>;
}
