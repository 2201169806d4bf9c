//! CSV export.

mod write;

pub use write::{write_csv, write_csv_string};
