use std::{cmp::Ordering, collections::BTreeSet};

use serde::Serialize;

use crate::types::Party;
use super::CandidateResult;

/// Ordered, duplicate-free selection domains exposed to front ends.
/// Unlabeled parties are excluded from `parties` (their rows stay in the table).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalogs {
    pub parties: Vec<Party>,
    pub states: Vec<String>,
    pub districts: Vec<String>,
}

impl Catalogs {
    pub(crate) fn from_rows(rows: &[CandidateResult]) -> Self {
        let parties: BTreeSet<&Party> = rows.iter().filter_map(|row| row.party.as_ref()).collect();
        let states: BTreeSet<&str> = rows.iter().map(|row| row.state()).collect();
        let districts: BTreeSet<&str> = rows.iter().map(|row| row.district()).collect();

        let mut districts: Vec<String> = districts.into_iter().map(str::to_string).collect();
        districts.sort_by(|a, b| district_order(a, b));

        Self {
            parties: parties.into_iter().cloned().collect(),
            states: states.into_iter().map(str::to_string).collect(),
            districts,
        }
    }
}

/// Numeric district ids sort by value and ahead of non-numeric ones.
fn district_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::Catalogs;
    use crate::{table::CandidateResult, types::{Party, RaceKey}};

    #[test]
    fn catalogs_are_sorted_and_deduplicated() {
        let rows = vec![
            CandidateResult::new(RaceKey::new("Texas", "10"), "a", Party::parse("republican"), 1, None),
            CandidateResult::new(RaceKey::new("Ohio", "2"), "b", Party::parse("democratic"), 1, None),
            CandidateResult::new(RaceKey::new("Texas", "2"), "c", None, 1, None),
            CandidateResult::new(RaceKey::new("Alaska", "At-Large"), "d", Party::parse("Green"), 1, None),
            CandidateResult::new(RaceKey::new("Ohio", "2"), "e", Party::parse("Democrat"), 1, None),
        ];
        let catalogs = Catalogs::from_rows(&rows);

        let parties: Vec<&str> = catalogs.parties.iter().map(Party::as_str).collect();
        assert_eq!(parties, ["D", "Green", "R"]);
        assert_eq!(catalogs.states, ["Alaska", "Ohio", "Texas"]);
        assert_eq!(catalogs.districts, ["2", "10", "At-Large"]);
    }
}
