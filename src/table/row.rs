use serde::Serialize;

use crate::types::{Party, RaceKey};

/// One candidate's result in one race.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateResult {
    #[serde(flatten)]
    pub key: RaceKey,
    pub candidate: String,
    pub party: Option<Party>,  // None = unlabeled
    pub votes: u64,
    pub percentage: Option<f64>,  // None = unknown
    /// Placeholder destination-party row created by a redistribution.
    pub synthetic: bool,
    /// Derived race values; None until the row has been aggregated.
    #[serde(flatten)]
    pub annotation: Option<Annotation>,
}

/// Race-level values merged back onto every row of a race.
/// All rows of one race carry the same winner and margin; only `vote_share` differs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub total_votes: u64,
    pub vote_share: f64,
    pub winner_name: String,
    pub winner_party: Option<Party>,
    pub winner_votes: u64,
    pub margin_of_victory: u64,
}

impl CandidateResult {
    pub fn new(key: RaceKey, candidate: impl Into<String>, party: Option<Party>, votes: u64, percentage: Option<f64>) -> Self {
        Self {
            key,
            candidate: candidate.into(),
            party,
            votes,
            percentage,
            synthetic: false,
            annotation: None,
        }
    }

    /// Placeholder row receiving transferred votes in a race where the
    /// destination party fielded no candidate.
    pub(crate) fn synthetic(key: RaceKey, party: Party, votes: u64) -> Self {
        Self {
            candidate: format!("New {party} Candidate"),
            party: Some(party),
            synthetic: true,
            ..Self::new(key, String::new(), None, votes, None)
        }
    }

    #[inline] pub fn state(&self) -> &str { self.key.state() }

    #[inline] pub fn district(&self) -> &str { self.key.district() }

    /// Share of the race's votes, once aggregated.
    #[inline] pub fn vote_share(&self) -> Option<f64> {
        self.annotation.as_ref().map(|annotation| annotation.vote_share)
    }

    #[inline] pub fn has_party(&self, party: &Party) -> bool {
        self.party.as_ref() == Some(party)
    }
}
