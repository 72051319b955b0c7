//! Response helpers. Table dumps are bare JSON arrays; no envelope is added.

use crate::store::Record;
use axum::{http::StatusCode, Json};

pub fn rows_ok(rows: Vec<Record>) -> (StatusCode, Json<Vec<Record>>) {
    (StatusCode::OK, Json(rows))
}
