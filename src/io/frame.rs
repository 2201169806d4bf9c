//! Conversion of engine outputs into Polars DataFrames for tabular export.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame};

use crate::{
    aggregate::DistrictRace,
    query::MarginEntry,
    redistribute::Transfer,
    table::{Annotation, CandidateTable},
    tally::SeatTally,
    types::Party,
};

#[inline]
fn label(party: Option<&Party>) -> Option<&str> { party.map(Party::as_str) }

impl CandidateTable {
    /// One row per candidate. Derived race columns are null on unaggregated rows.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows = self.rows();
        let derived = |f: fn(&Annotation) -> u64| -> Vec<Option<u64>> {
            rows.iter().map(|row| row.annotation.as_ref().map(f)).collect()
        };

        DataFrame::new(vec![
            Column::new("state".into(), rows.iter().map(|r| r.state()).collect::<Vec<_>>()),
            Column::new("district".into(), rows.iter().map(|r| r.district()).collect::<Vec<_>>()),
            Column::new("candidate".into(), rows.iter().map(|r| r.candidate.as_str()).collect::<Vec<_>>()),
            Column::new("party".into(), rows.iter().map(|r| label(r.party.as_ref())).collect::<Vec<_>>()),
            Column::new("votes".into(), rows.iter().map(|r| r.votes).collect::<Vec<_>>()),
            Column::new("percentage".into(), rows.iter().map(|r| r.percentage).collect::<Vec<_>>()),
            Column::new("synthetic".into(), rows.iter().map(|r| r.synthetic).collect::<Vec<_>>()),
            Column::new("total_votes".into(), derived(|a| a.total_votes)),
            Column::new("vote_share".into(), rows.iter()
                .map(|r| r.annotation.as_ref().map(|a| a.vote_share))
                .collect::<Vec<_>>()),
            Column::new("winner_name".into(), rows.iter()
                .map(|r| r.annotation.as_ref().map(|a| a.winner_name.as_str()))
                .collect::<Vec<_>>()),
            Column::new("winner_party".into(), rows.iter()
                .map(|r| r.annotation.as_ref().and_then(|a| label(a.winner_party.as_ref())))
                .collect::<Vec<_>>()),
            Column::new("winner_votes".into(), derived(|a| a.winner_votes)),
            Column::new("margin_of_victory".into(), derived(|a| a.margin_of_victory)),
        ]).context("[io::frame] Failed to build candidate table DataFrame")
    }
}

impl SeatTally {
    /// One row per party, alphabetical with unlabeled winners last.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let entries = self.sorted();
        DataFrame::new(vec![
            Column::new("party".into(), entries.iter().map(|e| label(e.party.as_ref())).collect::<Vec<_>>()),
            Column::new("seats_won".into(), entries.iter().map(|e| e.seats_won as u64).collect::<Vec<_>>()),
            Column::new("percentage".into(), entries.iter().map(|e| e.percentage).collect::<Vec<_>>()),
        ]).context("[io::frame] Failed to build seat tally DataFrame")
    }
}

/// One row per race, in race order.
pub fn races_to_dataframe(races: &[DistrictRace]) -> Result<DataFrame> {
    DataFrame::new(vec![
        Column::new("state".into(), races.iter().map(|r| r.state()).collect::<Vec<_>>()),
        Column::new("district".into(), races.iter().map(|r| r.district()).collect::<Vec<_>>()),
        Column::new("total_votes".into(), races.iter().map(|r| r.total_votes).collect::<Vec<_>>()),
        Column::new("winner_name".into(), races.iter().map(|r| r.winner_name.as_str()).collect::<Vec<_>>()),
        Column::new("winner_party".into(), races.iter().map(|r| label(r.winner_party.as_ref())).collect::<Vec<_>>()),
        Column::new("winner_votes".into(), races.iter().map(|r| r.winner_votes).collect::<Vec<_>>()),
        Column::new("winner_share".into(), races.iter().map(|r| r.winner_share_percent()).collect::<Vec<_>>()),
        Column::new("margin_of_victory".into(), races.iter().map(|r| r.margin_of_victory).collect::<Vec<_>>()),
        Column::new("num_candidates".into(), races.iter().map(|r| r.candidates.len() as u64).collect::<Vec<_>>()),
    ]).context("[io::frame] Failed to build race DataFrame")
}

pub fn transfers_to_dataframe(transfers: &[Transfer]) -> Result<DataFrame> {
    DataFrame::new(vec![
        Column::new("state".into(), transfers.iter().map(|t| t.key.state()).collect::<Vec<_>>()),
        Column::new("district".into(), transfers.iter().map(|t| t.key.district()).collect::<Vec<_>>()),
        Column::new("votes".into(), transfers.iter().map(|t| t.votes).collect::<Vec<_>>()),
        Column::new("recipient".into(), transfers.iter().map(|t| t.recipient.as_str()).collect::<Vec<_>>()),
        Column::new("synthetic".into(), transfers.iter().map(|t| t.synthetic).collect::<Vec<_>>()),
    ]).context("[io::frame] Failed to build transfer DataFrame")
}

pub fn margins_to_dataframe(margins: &[MarginEntry]) -> Result<DataFrame> {
    DataFrame::new(vec![
        Column::new("state".into(), margins.iter().map(|m| m.key.state()).collect::<Vec<_>>()),
        Column::new("district".into(), margins.iter().map(|m| m.key.district()).collect::<Vec<_>>()),
        Column::new("margin_of_victory".into(), margins.iter().map(|m| m.margin_of_victory).collect::<Vec<_>>()),
    ]).context("[io::frame] Failed to build margin DataFrame")
}
