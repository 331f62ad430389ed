use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use bierklub_infra::ServiceError;

/// Marker placed on error responses; `middleware::error_pages` renders the
/// matching template in place of the empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    NotFound,
    Internal,
}

impl ErrorPage {
    pub fn template(self) -> &'static str {
        match self {
            Self::NotFound => "404",
            Self::Internal => "500",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::NotFound => "Page Not Found",
            Self::Internal => "Uh Oh!",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound,
    Internal(anyhow::Error),
}

impl AppError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Internal(err.into())
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Extension(ErrorPage::NotFound)).into_response(),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Extension(ErrorPage::Internal),
                )
                    .into_response()
            }
        }
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
