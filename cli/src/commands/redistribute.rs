use std::{fs::File, io::BufReader};

use anyhow::{Context, Result};
use housesim::{redistribute, RedistributionRequest};

use super::{load_table, report};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RedistributeArgs) -> Result<()> {
    let request = match &args.request {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("[redistribute] Failed to open request file: {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("[redistribute] Failed to parse request from {:?}", path))?
        }
        None => RedistributionRequest {
            from_parties: args.from_parties.clone(),
            to_party: args.to_party.clone().unwrap_or_default(),
            state: args.state.clone(),
            district: args.district.clone(),
        },
    };

    let table = load_table(&args.source)?;
    let simulation = redistribute(&table, &request)?.value;
    tracing::info!(
        "[redistribute] moved {} votes into {} races",
        simulation.votes_moved(),
        simulation.transfers.len(),
    );

    report(&simulation.table, &simulation.races, Some(&simulation.transfers), args.view, &args.out)
}
