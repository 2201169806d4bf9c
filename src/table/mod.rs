mod catalogs;
mod row;

pub use catalogs::Catalogs;
pub use row::{Annotation, CandidateResult};

use serde::Serialize;

use crate::types::RaceKey;

/// One immutable generation of the candidate results table.
///
/// Every transform (aggregation, redistribution) takes a table by reference
/// and returns a new generation; nothing is patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandidateTable {
    rows: Vec<CandidateResult>,
}

impl CandidateTable {
    pub fn new(rows: Vec<CandidateResult>) -> Self { Self { rows } }

    #[inline] pub fn rows(&self) -> &[CandidateResult] { &self.rows }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[inline] pub fn iter(&self) -> std::slice::Iter<'_, CandidateResult> { self.rows.iter() }

    #[inline] pub fn into_rows(self) -> Vec<CandidateResult> { self.rows }

    /// Grand total of votes across every race.
    pub fn total_votes(&self) -> u64 {
        self.rows.iter().map(|row| row.votes).sum()
    }

    /// Distinct race keys in first-appearance order.
    pub fn race_keys(&self) -> Vec<RaceKey> {
        let mut seen = ahash::AHashSet::new();
        self.rows.iter()
            .filter(|row| seen.insert(&row.key))
            .map(|row| row.key.clone())
            .collect()
    }

    /// Rows belonging to a single race, in table order.
    pub fn race_rows<'a>(&'a self, key: &'a RaceKey) -> impl Iterator<Item = &'a CandidateResult> + 'a {
        self.rows.iter().filter(move |row| &row.key == key)
    }

    /// True when every row carries winner/margin annotations.
    pub fn is_annotated(&self) -> bool {
        self.rows.iter().all(|row| row.annotation.is_some())
    }

    /// Selection domains (parties, states, districts) for this generation.
    pub fn catalogs(&self) -> Catalogs { Catalogs::from_rows(&self.rows) }

    #[inline] pub(crate) fn rows_mut(&mut self) -> &mut Vec<CandidateResult> { &mut self.rows }
}

impl FromIterator<CandidateResult> for CandidateTable {
    fn from_iter<I: IntoIterator<Item = CandidateResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CandidateTable {
    type Item = &'a CandidateResult;
    type IntoIter = std::slice::Iter<'a, CandidateResult>;

    fn into_iter(self) -> Self::IntoIter { self.rows.iter() }
}
