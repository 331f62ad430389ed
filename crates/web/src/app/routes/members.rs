use std::sync::Arc;

use axum::Form;
use axum::extract::Extension;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use chrono::Utc;
use serde_json::json;
use tower_sessions::Session;

use bierklub_auth::RegistrationForm;
use bierklub_infra::{RegistrationOutcome, register_member};

use crate::app::dto::{MemberView, Page};
use crate::app::errors::AppError;
use crate::app::services::AppServices;
use crate::context::SessionContext;
use crate::middleware::MEMBER_SESSION_KEY;

use super::form_or_blank;

pub async fn register_form(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<SessionContext>,
) -> Result<Html<String>, AppError> {
    services.views.render(
        "register",
        &Page::new(&context, json!({ "form": RegistrationForm::default() })),
    )
}

/// Sign up, then sign the new member in.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(context): Extension<SessionContext>,
    session: Session,
    form: Result<Form<RegistrationForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let form = form_or_blank(form);
    match register_member(services.store.as_ref(), form, Utc::now()).await? {
        RegistrationOutcome::Registered(member) => {
            session.cycle_id().await?;
            session.insert(MEMBER_SESSION_KEY, member.id).await?;

            let signed_in = SessionContext::signed_in(member.clone());
            services.views.render(
                "welcome",
                &Page::new(&signed_in, json!({ "member": MemberView::from(&member) })),
            )
        }
        RegistrationOutcome::Rejected(rejection) => services.views.render(
            "register",
            &Page::new(
                &context,
                json!({ "form": rejection.form, "errors": rejection.errors }),
            ),
        ),
    }
}
