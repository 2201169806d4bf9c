//! Seat Tally: races won per party (the "house score").

use std::cmp::Ordering;

use ahash::AHashMap;

use serde::Serialize;

use crate::{
    aggregate::DistrictRace,
    error::{Reported, Warning},
    types::Party,
};

/// Seats held by one party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartySeats {
    pub party: Option<Party>,  // None = races won by unlabeled candidates
    pub seats_won: usize,
    pub percentage: f64,
}

/// Party → seats won, over one race collection.
///
/// Unlabeled winners are counted under `None` so that the seat counts always
/// add up to the number of races.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatTally {
    seats: AHashMap<Option<Party>, usize>,
    total_races: usize,
}

impl SeatTally {
    /// Count races by winner party. Zero races yields an empty tally and an
    /// `EmptyRaceSet` warning.
    pub fn from_races(races: &[DistrictRace]) -> Reported<Self> {
        let mut seats: AHashMap<Option<Party>, usize> = AHashMap::new();
        for race in races {
            *seats.entry(race.winner_party.clone()).or_default() += 1;
        }

        let mut reported = Reported::new(Self { seats, total_races: races.len() });
        if races.is_empty() { reported.warn(Warning::EmptyRaceSet) }
        reported
    }

    #[inline] pub fn total_races(&self) -> usize { self.total_races }

    #[inline] pub fn is_empty(&self) -> bool { self.total_races == 0 }

    /// Number of parties (including the unlabeled bucket) holding a seat.
    #[inline] pub fn num_parties(&self) -> usize { self.seats.len() }

    /// Seats won by `party`, 0 if it won none.
    pub fn seats(&self, party: Option<&Party>) -> usize {
        self.seats.get(&party.cloned()).copied().unwrap_or(0)
    }

    /// Share of all races won by `party`, in percent.
    pub fn percentage(&self, party: Option<&Party>) -> f64 {
        if self.total_races == 0 { return 0.0 }
        self.seats(party) as f64 / self.total_races as f64 * 100.0
    }

    /// Unordered entries; ordering is left to the caller.
    pub fn entries(&self) -> impl Iterator<Item = PartySeats> + '_ {
        self.seats.iter().map(|(party, &seats_won)| PartySeats {
            party: party.clone(),
            seats_won,
            percentage: seats_won as f64 / self.total_races as f64 * 100.0,
        })
    }

    /// Entries ordered alphabetically by party label, unlabeled last.
    pub fn sorted(&self) -> Vec<PartySeats> {
        let mut entries: Vec<PartySeats> = self.entries().collect();
        entries.sort_by(|a, b| match (&a.party, &b.party) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        entries
    }
}
