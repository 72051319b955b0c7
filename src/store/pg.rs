//! Direct PostgreSQL access to the same tables the hosted REST interface exposes.

use super::{Record, RowStore};
use crate::config::PgSettings;
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};

pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub async fn connect(settings: &PgSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await?;
        Ok(PgStore {
            pool,
            schema: settings.schema.clone(),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Each row rendered by Postgres itself as one JSON object, columns in table order.
/// Covers every column type (numeric, enums, arrays, ...) the same way the REST interface does.
pub(crate) fn select_all_sql(schema: &str, table: &str) -> String {
    format!(
        "SELECT row_to_json(t) FROM {}.{} AS t",
        quote_ident(schema),
        quote_ident(table)
    )
}

#[async_trait]
impl RowStore for PgStore {
    async fn select_all(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        let sql = select_all_sql(&self.schema, table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_scalar::<_, Value>(&sql).fetch_all(&self.pool).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(serde_json::from_value::<Record>(row)?);
        }
        Ok(out)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
