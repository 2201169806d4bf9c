//! Aggregator: per-race totals, vote shares, winners and margins.

mod group;
mod race;

pub use race::{CandidateShare, DistrictRace};

pub(crate) use group::group_rows;
pub(crate) use race::share;

use crate::{
    error::{Reported, Warning},
    table::CandidateTable,
    tally::SeatTally,
};

/// An annotated table generation together with its race collection.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Input rows, each carrying its race's derived values.
    pub table: CandidateTable,
    /// One entry per (state, district), in first-appearance order.
    pub races: Vec<DistrictRace>,
}

impl Aggregation {
    /// Seats won per party over this generation's races.
    pub fn tally(&self) -> Reported<SeatTally> { SeatTally::from_races(&self.races) }

    #[inline] pub fn num_races(&self) -> usize { self.races.len() }
}

/// Compute every race of `table` and merge the results back onto its rows.
///
/// Any annotations already present are discarded and recomputed from the
/// vote counts. An empty table yields an empty aggregation and an
/// `EmptyRaceSet` warning.
pub fn aggregate(table: &CandidateTable) -> Reported<Aggregation> {
    let groups = group_rows(table.rows());
    let mut annotated = table.clone();
    let mut races = Vec::with_capacity(groups.len());

    for group in groups {
        let members = group.members.iter().map(|&i| &table.rows()[i]);
        let Some(race) = DistrictRace::reduce(group.key, members) else { continue };

        let rows = annotated.rows_mut();
        for &i in &group.members {
            let votes = rows[i].votes;
            rows[i].annotation = Some(race.annotation(votes));
        }
        races.push(race);
    }

    tracing::debug!(rows = table.len(), races = races.len(), "aggregated races");

    let mut reported = Reported::new(Aggregation { table: annotated, races });
    if reported.value.races.is_empty() { reported.warn(Warning::EmptyRaceSet) }
    reported
}
