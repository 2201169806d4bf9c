//! IO module for the boundary formats of the engine.
//!
//! # Format Modules
//!
//! - `json` - nested source records in, serde JSON reports out
//! - `csv` - CSV export of annotated tables, races and seat tallies
//! - `parquet` - Parquet export (requires `parquet` feature)
//! - `frame` - conversion of engine outputs into Polars DataFrames

mod csv;
mod frame;
mod json;

#[cfg(feature = "parquet")]
mod parquet;

use std::path::Path;

pub use csv::{write_csv, write_csv_string};
pub use frame::{margins_to_dataframe, races_to_dataframe, transfers_to_dataframe};
pub use json::{read_source_json, read_source_str, write_json};

#[cfg(feature = "parquet")]
pub use parquet::write_parquet;

/// File format of a written output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat { Csv, Json }

impl OutputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::OutputFormat;

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out/races.CSV")), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_path(Path::new("report.json")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("report")), None);
    }
}
