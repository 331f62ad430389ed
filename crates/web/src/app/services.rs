//! Shared per-process state handed to every handler.

use std::sync::Arc;

use anyhow::Context;

use bierklub_infra::{ClubStore, Config, InMemoryClubStore, PostgresClubStore};

use super::views::Views;

pub struct AppServices {
    pub store: Arc<dyn ClubStore>,
    pub views: Views,
}

impl AppServices {
    pub fn new(store: Arc<dyn ClubStore>) -> anyhow::Result<Self> {
        let views = Views::new().context("failed to compile templates")?;
        Ok(Self { store, views })
    }
}

/// Pick the store from configuration: PostgreSQL when `DATABASE_URL` is set,
/// otherwise the in-process store.
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ClubStore>> {
    match &config.database {
        Some(db) => {
            let store = PostgresClubStore::connect(db)
                .await
                .context("failed to connect to Postgres")?;
            tracing::info!("using Postgres store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
            Ok(Arc::new(InMemoryClubStore::new()))
        }
    }
}
