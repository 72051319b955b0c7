//! One GET route per catalog table.

use crate::config::Table;
use crate::handlers::dump_table;
use crate::state::AppState;
use axum::{extract::State, routing::get, Router};

pub fn table_routes(state: AppState) -> Router {
    Table::ALL
        .into_iter()
        .fold(Router::<AppState>::new(), |router, table| {
            router.route(
                table.route(),
                get(move |State(state): State<AppState>| dump_table(state, table)),
            )
        })
        .with_state(state)
}
