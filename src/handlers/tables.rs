//! Table dump handler. Query strings and bodies are ignored; the table is fixed by the route.

use crate::config::Table;
use crate::error::AppError;
use crate::response::rows_ok;
use crate::service::RowDumper;
use crate::state::AppState;
use axum::response::IntoResponse;

pub async fn dump_table(state: AppState, table: Table) -> Result<impl IntoResponse, AppError> {
    let rows = RowDumper::dump(state.store.as_ref(), table).await?;
    Ok(rows_ok(rows))
}
