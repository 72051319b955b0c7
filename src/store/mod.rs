//! Remote store access. A store answers one question: every row of a named table.

pub mod pg;
pub mod rest;

use crate::config::{StoreSettings, Table};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;

pub use crate::error::StoreError;
pub use pg::PgStore;
pub use rest::RestStore;

/// One row as returned by the store: field name to value, in store order.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Unfiltered select of `table`. Order is whatever the store returns.
    async fn select_all(&self, table: &str) -> Result<Vec<Record>, StoreError>;

    /// Reachability check for `/ready`.
    async fn ping(&self) -> Result<(), StoreError> {
        self.select_all(Table::Users.name()).await.map(|_| ())
    }

    /// Short backend label for logs.
    fn backend(&self) -> &'static str;
}

/// Build the configured store. With Postgres and `apply_schema`, creates missing tables first.
pub async fn open(settings: &StoreSettings) -> Result<Arc<dyn RowStore>, AppError> {
    match settings {
        StoreSettings::Rest(rest) => {
            let store = RestStore::new(rest)?;
            tracing::info!(url = %rest.url, schema = %rest.schema, "using REST store");
            Ok(Arc::new(store))
        }
        StoreSettings::Postgres(pg) => {
            let store = PgStore::connect(pg).await?;
            tracing::info!(schema = %pg.schema, max_connections = pg.max_connections, "using Postgres store");
            if pg.apply_schema {
                crate::schema::apply_schema(store.pool(), &pg.schema).await?;
            }
            Ok(Arc::new(store))
        }
    }
}
