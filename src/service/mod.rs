//! Service layer: the row dumper behind every table route.

pub mod dumper;
pub use dumper::RowDumper;
