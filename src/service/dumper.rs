//! Fetch-all passthrough against the remote store.

use crate::config::Table;
use crate::error::AppError;
use crate::store::{Record, RowStore};

pub struct RowDumper;

impl RowDumper {
    /// Every row of `table`, unfiltered and in store order. Store failures are returned as-is; nothing is retried.
    pub async fn dump(store: &dyn RowStore, table: Table) -> Result<Vec<Record>, AppError> {
        tracing::debug!(table = %table, backend = store.backend(), "dump start");
        match store.select_all(table.name()).await {
            Ok(rows) => {
                tracing::info!(table = %table, rows = rows.len(), backend = store.backend(), "dump");
                Ok(rows)
            }
            Err(e) => {
                tracing::warn!(table = %table, backend = store.backend(), error = %e, "dump failed");
                Err(e.into())
            }
        }
    }
}
