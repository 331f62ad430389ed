//! Application wiring (axum router + shared services).
//!
//! - `services.rs`: store selection and the state shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `views.rs`: handlebars templates
//! - `dto.rs`: view models
//! - `errors.rs`: 404/500 mapping

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use bierklub_infra::{ClubStore, Config};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod views;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &Config) -> anyhow::Result<Router> {
    let store = services::build_store(config).await?;
    build_router(store, config.session_secure_cookie)
}

/// Router over an already-opened store.
pub fn build_router(store: Arc<dyn ClubStore>, secure_cookie: bool) -> anyhow::Result<Router> {
    let services = Arc::new(services::AppServices::new(store)?);

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_http_only(true);

    Ok(routes::router()
        .layer(axum::middleware::from_fn(middleware::session_context))
        .layer(sessions)
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::error_pages))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        ))
}
