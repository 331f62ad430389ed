//! RSVP workflow.

use chrono::{DateTime, Utc};
use tracing::instrument;

use bierklub_club::{AttendanceForm, NewMember};
use bierklub_core::{EventId, MemberId};

use crate::error::ServiceError;
use crate::form::FormRejection;
use crate::queries;
use crate::store::ClubStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceReceipt {
    pub event_id: EventId,
    pub member_id: MemberId,
    pub member_created: bool,
    pub already_attending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceOutcome {
    Recorded(AttendanceReceipt),
    Rejected(FormRejection<AttendanceForm>),
}

/// Record that the person named in `form` will attend `event_id`.
///
/// The event is looked up without the visibility filter. The member is
/// matched on the exact email; a known address keeps its stored name.
/// Submitting twice is not an error.
#[instrument(skip(store, form), fields(event_id = %event_id), err)]
pub async fn submit_attendance(
    store: &dyn ClubStore,
    event_id: EventId,
    form: AttendanceForm,
    now: DateTime<Utc>,
) -> Result<AttendanceOutcome, ServiceError> {
    let event = queries::get_event(store, event_id).await?;

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            tracing::debug!(fields = ?errors, "attendance form rejected");
            return Ok(AttendanceOutcome::Rejected(FormRejection::new(errors, form)));
        }
    };

    let attendee = NewMember {
        name: valid.name,
        email: valid.email,
        join_date: now.date_naive(),
    };
    let record = store.record_attendance(event.id, attendee).await?;

    tracing::info!(
        member_id = %record.member.id,
        member_created = record.member_created,
        already_attending = record.already_attending,
        "attendance recorded"
    );

    Ok(AttendanceOutcome::Recorded(AttendanceReceipt {
        event_id: event.id,
        member_id: record.member.id,
        member_created: record.member_created,
        already_attending: record.already_attending,
    }))
}
