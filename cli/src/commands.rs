pub mod ask;
pub mod redistribute;
pub mod summary;

use std::{io::Write, path::Path};

use anyhow::{bail, Context, Result};
use housesim::{
    normalize, races_to_dataframe, read_source_json, transfers_to_dataframe, write_csv, write_csv_string,
    write_json, CandidateTable, DistrictRace, OutputFormat, SeatTally, Transfer,
};
use polars::frame::DataFrame;
use serde::Serialize;

use crate::cli::{Format, OutputArgs, View};

/// Read and normalize a source file. Malformed records abort the command.
pub fn load_table(path: &Path) -> Result<CandidateTable> {
    tracing::info!("loading source records from {}", path.display());
    let source = read_source_json(path)?;
    let normalized = normalize(&source)
        .with_context(|| format!("[load] Invalid source records in {}", path.display()))?;
    Ok(normalized.value.table)
}

/// Emit the requested view of a result generation.
pub fn report(table: &CandidateTable, races: &[DistrictRace], transfers: Option<&[Transfer]>, view: View, out: &OutputArgs) -> Result<()> {
    match view {
        View::Table => emit(table, || table.to_dataframe(), out),
        View::Races => emit(races, || races_to_dataframe(races), out),
        View::Seats => {
            let tally = SeatTally::from_races(races).value;
            emit(&tally.sorted(), || tally.to_dataframe(), out)
        }
        View::Transfers => match transfers {
            Some(transfers) => emit(transfers, || transfers_to_dataframe(transfers), out),
            None => bail!("[report] transfers are only produced by `redistribute`"),
        },
    }
}

/// Write `value` as JSON, or the DataFrame built by `frame` as CSV, to the output file or stdout.
pub fn emit<T: Serialize + ?Sized>(value: &T, frame: impl FnOnce() -> Result<DataFrame>, out: &OutputArgs) -> Result<()> {
    let format = out.format
        .or_else(|| out.output.as_deref().and_then(OutputFormat::from_path).map(|format| match format {
            OutputFormat::Csv => Format::Csv,
            OutputFormat::Json => Format::Json,
        }))
        .unwrap_or(Format::Csv);

    match (&out.output, format) {
        (Some(path), Format::Csv) => {
            tracing::info!("writing csv report to {}", path.display());
            write_csv(&mut frame()?, path)
        }
        (Some(path), Format::Json) => {
            tracing::info!("writing json report to {}", path.display());
            write_json(value, path)
        }
        (None, Format::Csv) => print(&write_csv_string(&mut frame()?)?),
        (None, Format::Json) => {
            let text = serde_json::to_string_pretty(value).context("[emit] Failed to serialize report")?;
            print(&(text + "\n"))
        }
    }
}

fn print(text: &str) -> Result<()> {
    std::io::stdout().lock().write_all(text.as_bytes()).context("[emit] Failed to write to stdout")
}
