//! Servem backend: read-only HTTP passthrough over the volunteer-scheduling tables.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Settings, StoreSettings, Table};
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{app, common_routes, table_routes};
pub use service::RowDumper;
pub use state::AppState;
pub use store::{Record, RowStore};
