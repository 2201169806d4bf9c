use serde::Serialize;
use smallvec::SmallVec;

use crate::{
    table::{Annotation, CandidateResult},
    types::{Party, RaceKey},
};

/// A candidate's standing within its race.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateShare {
    pub candidate: String,
    pub party: Option<Party>,
    pub votes: u64,
    pub vote_share: f64,
}

/// Derived result of one race.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictRace {
    #[serde(flatten)]
    pub key: RaceKey,
    pub total_votes: u64,
    pub winner_name: String,
    pub winner_party: Option<Party>,
    pub winner_votes: u64,
    pub margin_of_victory: u64,
    /// Every candidate in table order.
    pub candidates: Vec<CandidateShare>,
    #[serde(skip)]
    winner: usize,
    #[serde(skip)]
    runner_up: Option<usize>,
}

/// `votes / total`, or 0 when the race has no votes.
#[inline]
pub(crate) fn share(votes: u64, total: u64) -> f64 {
    if total == 0 { 0.0 } else { votes as f64 / total as f64 }
}

impl DistrictRace {
    /// Reduce the rows of one race. Returns `None` for an empty group.
    ///
    /// Candidates are ranked by votes, descending. Equal counts keep table
    /// order (`sort_by` is stable), so the first-encountered candidate wins a
    /// tie and the runner-up is the next one in that order.
    pub(crate) fn reduce<'a>(key: RaceKey, rows: impl IntoIterator<Item = &'a CandidateResult>) -> Option<Self> {
        let rows: SmallVec<[&CandidateResult; 8]> = rows.into_iter().collect();
        if rows.is_empty() { return None }

        let total_votes: u64 = rows.iter().map(|row| row.votes).sum();
        let candidates: Vec<CandidateShare> = rows.iter()
            .map(|row| CandidateShare {
                candidate: row.candidate.clone(),
                party: row.party.clone(),
                votes: row.votes,
                vote_share: share(row.votes, total_votes),
            })
            .collect();

        let mut ranking: SmallVec<[usize; 8]> = (0..candidates.len()).collect();
        ranking.sort_by(|&a, &b| candidates[b].votes.cmp(&candidates[a].votes));

        let winner = ranking[0];
        let runner_up = ranking.get(1).copied();
        let winner_votes = candidates[winner].votes;
        let margin_of_victory = match runner_up {
            Some(i) => winner_votes - candidates[i].votes,
            None => winner_votes,
        };

        Some(Self {
            total_votes,
            winner_name: candidates[winner].candidate.clone(),
            winner_party: candidates[winner].party.clone(),
            winner_votes,
            margin_of_victory,
            candidates,
            winner,
            runner_up,
            key,
        })
    }

    #[inline] pub fn state(&self) -> &str { self.key.state() }

    #[inline] pub fn district(&self) -> &str { self.key.district() }

    #[inline] pub fn winner(&self) -> &CandidateShare { &self.candidates[self.winner] }

    #[inline] pub fn runner_up(&self) -> Option<&CandidateShare> { self.runner_up.map(|i| &self.candidates[i]) }

    /// Exactly one candidate stood.
    #[inline] pub fn is_uncontested(&self) -> bool { self.candidates.len() == 1 }

    /// Everyone except the winner, in table order.
    pub fn other_candidates(&self) -> impl Iterator<Item = &CandidateShare> {
        self.candidates.iter().enumerate()
            .filter(move |(i, _)| *i != self.winner)
            .map(|(_, share)| share)
    }

    /// Winner's share of the race in percent (0 when nobody received votes).
    pub fn winner_share_percent(&self) -> f64 {
        share(self.winner_votes, self.total_votes) * 100.0
    }

    /// Race values to merge onto a member row with the given vote count.
    pub(crate) fn annotation(&self, votes: u64) -> Annotation {
        Annotation {
            total_votes: self.total_votes,
            vote_share: share(votes, self.total_votes),
            winner_name: self.winner_name.clone(),
            winner_party: self.winner_party.clone(),
            winner_votes: self.winner_votes,
            margin_of_victory: self.margin_of_victory,
        }
    }
}
