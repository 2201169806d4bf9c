use anyhow::Result;
use housesim::aggregate;

use super::{load_table, report};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::SummaryArgs) -> Result<()> {
    let table = load_table(&args.source)?;
    let aggregation = aggregate(&table).value;
    tracing::info!("[summary] {} candidates in {} races", aggregation.table.len(), aggregation.num_races());

    report(&aggregation.table, &aggregation.races, None, args.view, &args.out)
}
