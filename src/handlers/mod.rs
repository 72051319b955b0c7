//! HTTP handlers for table dumps.

pub mod tables;
pub use tables::*;
