use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::response::Html;
use chrono::Utc;
use serde_json::json;

use bierklub_infra::queries;

use crate::app::dto::{EventView, MemberView, Page};
use crate::app::errors::AppError;
use crate::app::services::AppServices;
use crate::context::SessionContext;

use super::parse_event_id;

pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<SessionContext>,
) -> Result<Html<String>, AppError> {
    let now = Utc::now();
    let events = queries::list_visible_events(services.store.as_ref(), now).await?;
    let events: Vec<EventView> = events.iter().map(|e| EventView::new(e, now)).collect();

    services
        .views
        .render("index", &Page::new(&context, json!({ "events": events })))
}

pub async fn detail(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<SessionContext>,
    Path(event_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let event_id = parse_event_id(&event_id)?;
    let now = Utc::now();

    let event = queries::get_visible_event(services.store.as_ref(), event_id, now).await?;
    let attendees = queries::attendees(services.store.as_ref(), event.id).await?;
    let attendees: Vec<MemberView> = attendees.iter().map(MemberView::from).collect();

    services.views.render(
        "detail",
        &Page::new(
            &context,
            json!({
                "event": EventView::new(&event, now),
                "attendees": attendees,
            }),
        ),
    )
}
