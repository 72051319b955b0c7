//! Shared application state for all routes.

use crate::store::RowStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Holds credentials only; read-only after startup.
    pub store: Arc<dyn RowStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        AppState { store }
    }
}
