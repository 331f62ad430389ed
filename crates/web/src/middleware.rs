use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use bierklub_core::MemberId;
use bierklub_infra::queries;

use crate::app::errors::ErrorPage;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Session key holding the signed-in member's id.
pub const MEMBER_SESSION_KEY: &str = "member_id";

/// Resolve the signed-in member (if any) and attach a [`SessionContext`].
///
/// An unreadable session or a member id that no longer resolves degrades to
/// an anonymous visitor.
pub async fn session_context(
    Extension(services): Extension<Arc<AppServices>>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Response {
    let context = match session.get::<MemberId>(MEMBER_SESSION_KEY).await {
        Ok(Some(member_id)) => match queries::get_member(services.store.as_ref(), member_id).await {
            Ok(member) => SessionContext::signed_in(member),
            Err(err) if err.is_not_found() => SessionContext::anonymous(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load session member");
                SessionContext::anonymous()
            }
        },
        Ok(None) => SessionContext::anonymous(),
        Err(err) => {
            tracing::warn!(error = %err, "unreadable session");
            SessionContext::anonymous()
        }
    };

    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Replace the body of responses marked with [`ErrorPage`] by the rendered
/// error template.
pub async fn error_pages(
    Extension(services): Extension<Arc<AppServices>>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    let Some(page) = response.extensions().get::<ErrorPage>().copied() else {
        return response;
    };

    let status = response.status();
    match services.views.error_page(page) {
        Ok(html) => (status, html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render error page");
            (status, page.title()).into_response()
        }
    }
}

/// Turn a handler panic into a marked 500 so `error_pages` can render it.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Extension(ErrorPage::Internal),
    )
        .into_response()
}
