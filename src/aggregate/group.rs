use ahash::AHashMap;
use smallvec::SmallVec;

use crate::{table::CandidateResult, types::RaceKey};

/// Row indices of one race, in table order.
pub(crate) type Members = SmallVec<[usize; 8]>;

/// All rows of one (state, district) race.
#[derive(Debug, Clone)]
pub(crate) struct RaceGroup {
    pub key: RaceKey,
    pub members: Members,
}

/// Partition rows into races. Groups are returned in first-appearance order.
pub(crate) fn group_rows(rows: &[CandidateResult]) -> Vec<RaceGroup> {
    let mut index: AHashMap<&RaceKey, usize> = AHashMap::new();
    let mut groups: Vec<RaceGroup> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let slot = *index.entry(&row.key).or_insert_with(|| {
            groups.push(RaceGroup { key: row.key.clone(), members: Members::new() });
            groups.len() - 1
        });
        groups[slot].members.push(i);
    }

    groups
}
