//! Club domain: events, members and attendance.
//!
//! Pure domain logic (no IO, no HTTP, no storage). Every time-dependent rule
//! takes `now` as an argument.

pub mod attendance;
pub mod event;
pub mod member;

pub use attendance::{AttendanceForm, ValidAttendance};
pub use event::{Event, NewEvent, LATEST_EVENTS_LIMIT, latest_published};
pub use member::{Member, NewMember};
