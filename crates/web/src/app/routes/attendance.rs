use std::sync::Arc;

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Extension, Path};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use serde_json::json;

use bierklub_club::AttendanceForm;
use bierklub_infra::{AttendanceOutcome, queries, submit_attendance};

use crate::app::dto::{EventView, MemberView, Page};
use crate::app::errors::AppError;
use crate::app::services::AppServices;
use crate::context::SessionContext;

use super::{form_or_blank, parse_event_id, parse_member_id};

/// RSVP form. Reachable for any existing event, published or not.
pub async fn form(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<SessionContext>,
    Path(event_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let event_id = parse_event_id(&event_id)?;
    let now = Utc::now();
    let event = queries::get_event(services.store.as_ref(), event_id).await?;

    let prefill = match context.member() {
        Some(member) => AttendanceForm {
            name: member.name.clone(),
            email: member.email.clone(),
        },
        None => AttendanceForm::default(),
    };

    services.views.render(
        "attending",
        &Page::new(
            &context,
            json!({ "event": EventView::new(&event, now), "form": prefill }),
        ),
    )
}

pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<SessionContext>,
    Path(event_id): Path<String>,
    form: Result<Form<AttendanceForm>, FormRejection>,
) -> Result<Response, AppError> {
    let event_id = parse_event_id(&event_id)?;
    let form = form_or_blank(form);
    let now = Utc::now();

    match submit_attendance(services.store.as_ref(), event_id, form, now).await? {
        AttendanceOutcome::Recorded(receipt) => Ok(Redirect::to(&format!(
            "/events/{}/attending/{}",
            receipt.event_id, receipt.member_id
        ))
        .into_response()),
        AttendanceOutcome::Rejected(rejection) => {
            let event = queries::get_event(services.store.as_ref(), event_id).await?;
            let page = services.views.render(
                "attending",
                &Page::new(
                    &context,
                    json!({
                        "event": EventView::new(&event, now),
                        "form": rejection.form,
                        "errors": rejection.errors,
                    }),
                ),
            )?;
            Ok(page.into_response())
        }
    }
}

pub async fn success(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<SessionContext>,
    Path((event_id, member_id)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let event_id = parse_event_id(&event_id)?;
    let member_id = parse_member_id(&member_id)?;
    let now = Utc::now();

    let event = queries::get_event(services.store.as_ref(), event_id).await?;
    let member = queries::get_member(services.store.as_ref(), member_id).await?;

    services.views.render(
        "attending_success",
        &Page::new(
            &context,
            json!({
                "event": EventView::new(&event, now),
                "member": MemberView::from(&member),
            }),
        ),
    )
}
