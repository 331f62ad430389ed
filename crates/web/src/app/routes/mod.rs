use axum::{
    Form, Router,
    extract::rejection::FormRejection,
    routing::{get, post},
};

use bierklub_core::{EventId, MemberId};

use super::errors::{self, AppError};

pub mod attendance;
pub mod events;
pub mod members;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/", get(events::index))
        .route("/events/", get(events::index))
        .route("/events/register/", get(members::register_form).post(members::register))
        .route("/events/:event_id/", get(events::detail))
        .route("/events/:event_id/attending/", get(attendance::form))
        .route("/events/:event_id/attending/submit/", post(attendance::submit))
        .route("/events/:event_id/attending/:member_id", get(attendance::success))
        .fallback(errors::not_found)
}

/// Malformed identifiers are indistinguishable from unknown ones.
pub(crate) fn parse_event_id(raw: &str) -> Result<EventId, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

pub(crate) fn parse_member_id(raw: &str) -> Result<MemberId, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

/// A body that cannot be decoded is validated as an empty form, so the
/// visitor gets the page back with field errors instead of a bare 422.
pub(crate) fn form_or_blank<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "undecodable form body");
            T::default()
        }
    }
}
