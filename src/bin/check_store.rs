//! Connectivity check: dumps the users table once and prints it.

use servem_backend::{logging, store, RowDumper, Settings, Table};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let settings = Settings::from_env()?;
    let store = store::open(&settings.store).await?;
    tracing::info!(backend = store.backend(), "connected to store");

    let rows = RowDumper::dump(store.as_ref(), Table::Users).await?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    tracing::info!(rows = rows.len(), "store reachable");
    Ok(())
}
