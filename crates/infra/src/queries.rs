//! Read side used by the public pages.

use chrono::{DateTime, Utc};
use tracing::instrument;

use bierklub_club::{Event, LATEST_EVENTS_LIMIT, Member};
use bierklub_core::{DomainError, EventId, MemberId};

use crate::error::ServiceError;
use crate::store::ClubStore;

/// The landing list: at most five visible events, newest publish first.
#[instrument(skip(store), err)]
pub async fn list_visible_events(
    store: &dyn ClubStore,
    now: DateTime<Utc>,
) -> Result<Vec<Event>, ServiceError> {
    Ok(store.list_published_events(now, LATEST_EVENTS_LIMIT).await?)
}

/// An event whose invite has gone out. Future-published events are reported
/// exactly like unknown ones.
#[instrument(skip(store), fields(event_id = %id), err)]
pub async fn get_visible_event(
    store: &dyn ClubStore,
    id: EventId,
    now: DateTime<Utc>,
) -> Result<Event, ServiceError> {
    match store.get_event(id).await? {
        Some(event) if event.is_visible(now) => Ok(event),
        _ => Err(DomainError::not_found().into()),
    }
}

/// Unconditional lookup, used by the RSVP pages.
#[instrument(skip(store), fields(event_id = %id), err)]
pub async fn get_event(store: &dyn ClubStore, id: EventId) -> Result<Event, ServiceError> {
    store
        .get_event(id)
        .await?
        .ok_or_else(|| DomainError::not_found().into())
}

#[instrument(skip(store), fields(member_id = %id), err)]
pub async fn get_member(store: &dyn ClubStore, id: MemberId) -> Result<Member, ServiceError> {
    store
        .get_member(id)
        .await?
        .ok_or_else(|| DomainError::not_found().into())
}

pub async fn attendees(
    store: &dyn ClubStore,
    event_id: EventId,
) -> Result<Vec<Member>, ServiceError> {
    Ok(store.attendees(event_id).await?)
}
