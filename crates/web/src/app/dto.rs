//! View models: what templates see, with dates already formatted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bierklub_club::{Event, Member};

use crate::context::SessionContext;

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preamble: String,
    pub additional_notes: String,
    pub number: i32,
    pub location: String,
    pub date: String,
    pub published: String,
    pub is_new: bool,
    pub is_soon: bool,
    pub summary: String,
}

impl EventView {
    pub fn new(event: &Event, now: DateTime<Utc>) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            description: event.description.clone(),
            preamble: event.preamble.clone(),
            additional_notes: event.additional_notes.clone(),
            number: event.number,
            location: event.location.clone(),
            date: event.date.format("%A, %B %-d, %Y at %H:%M").to_string(),
            published: event.published_date.format("%B %-d, %Y").to_string(),
            is_new: event.was_published_recently(now),
            is_soon: event.is_soon(now),
            summary: event.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub joined: String,
    pub summary: String,
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            email: member.email.clone(),
            joined: member.join_date.format("%B %-d, %Y").to_string(),
            summary: member.to_string(),
        }
    }
}

/// Data every page gets: the signed-in member for the header greeting.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub viewer: Option<MemberView>,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Page<T> {
    pub fn new(context: &SessionContext, body: T) -> Self {
        Self {
            viewer: context.member().map(MemberView::from),
            body,
        }
    }
}
