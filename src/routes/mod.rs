//! Router assembly.

pub mod common;
pub mod tables;

pub use common::common_routes;
pub use tables::table_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Table routes plus health/readiness/version, with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(table_routes(state.clone()))
        .merge(common_routes(state))
        .layer(TraceLayer::new_for_http())
}
