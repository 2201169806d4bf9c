//! Redistribution Engine: simulated transfer of votes between parties.

use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    aggregate::{aggregate, group_rows, share, Aggregation, DistrictRace},
    error::{ElectionError, Reported, Result, Warning},
    table::{CandidateResult, CandidateTable},
    tally::SeatTally,
    types::{Party, RaceKey},
};

/// Request shape accepted from front ends and request files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedistributionRequest {
    pub from_parties: Vec<String>,
    pub to_party: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

/// Optional state and district restriction. An unset field matches every race.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceFilter {
    pub state: Option<String>,
    pub district: Option<String>,
}

impl RaceFilter {
    pub fn matches(&self, key: &RaceKey) -> bool {
        self.state.as_deref().is_none_or(|state| key.state() == state)
            && self.district.as_deref().is_none_or(|district| key.district() == district)
    }
}

/// Votes moved into one race.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    #[serde(flatten)]
    pub key: RaceKey,
    pub votes: u64,
    /// Candidate that received the votes.
    pub recipient: String,
    /// The recipient was created for this transfer.
    pub synthetic: bool,
}

/// New table generation produced by a redistribution.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    /// Annotated rows of the new generation.
    pub table: CandidateTable,
    pub races: Vec<DistrictRace>,
    /// One entry per race that received votes, in first-appearance order.
    pub transfers: Vec<Transfer>,
}

impl Simulation {
    /// Seats won per party after the transfer.
    pub fn tally(&self) -> Reported<SeatTally> { SeatTally::from_races(&self.races) }

    /// True if the table was left as it was (no source rows matched).
    #[inline] pub fn is_unchanged(&self) -> bool { self.transfers.is_empty() }

    /// Total votes moved across all races.
    pub fn votes_moved(&self) -> u64 { self.transfers.iter().map(|t| t.votes).sum() }

    fn from_aggregation(aggregation: Aggregation, transfers: Vec<Transfer>) -> Self {
        Self { table: aggregation.table, races: aggregation.races, transfers }
    }
}

/// A validated transfer of every vote of `from_parties` to `to_party`.
#[derive(Debug, Clone, PartialEq)]
pub struct Redistribution {
    from_parties: BTreeSet<Party>,
    to_party: Party,
    filter: RaceFilter,
}

impl Redistribution {
    /// Transfer across all races. At least one source party is required.
    pub fn new(from_parties: impl IntoIterator<Item = Party>, to_party: Party) -> Result<Self> {
        let from_parties: BTreeSet<Party> = from_parties.into_iter().collect();
        if from_parties.is_empty() {
            return Err(ElectionError::InvalidRequest("at least one source party is required".into()));
        }
        Ok(Self { from_parties, to_party, filter: RaceFilter::default() })
    }

    /// Restrict to races in `state`. Blank means no restriction.
    pub fn in_state(mut self, state: impl AsRef<str>) -> Self {
        self.filter.state = non_blank(state.as_ref());
        self
    }

    /// Restrict to races with district id `district`. Blank means no restriction.
    pub fn in_district(mut self, district: impl AsRef<str>) -> Self {
        self.filter.district = non_blank(district.as_ref());
        self
    }

    #[inline] pub fn from_parties(&self) -> &BTreeSet<Party> { &self.from_parties }

    #[inline] pub fn to_party(&self) -> &Party { &self.to_party }

    #[inline] pub fn filter(&self) -> &RaceFilter { &self.filter }

    /// Produce the next table generation.
    ///
    /// Every matching source row keeps its place with its votes set to zero.
    /// Per race, the removed votes go to the destination-party row with the
    /// most votes (first one on ties), or to a new synthetic row when the
    /// party has no candidate there. Touched races get their percentages
    /// recomputed, then the whole table is re-aggregated.
    ///
    /// If no row with votes matches, the vote counts are left unchanged and the
    /// table is only re-aggregated, with a `NoMatchingSource` warning.
    pub fn apply(&self, table: &CandidateTable) -> Reported<Simulation> {
        let sources: Vec<usize> = table.iter().enumerate()
            .filter(|(_, row)| self.is_source(row))
            .map(|(i, _)| i)
            .collect();

        if sources.is_empty() {
            let aggregation = aggregate(table);
            let mut reported = Reported::new(Simulation::from_aggregation(aggregation.value, Vec::new()));
            reported.warnings = aggregation.warnings;
            reported.warn(self.no_match_warning());
            return reported;
        }

        let mut next = table.clone();
        let rows = next.rows_mut();

        // Votes leaving each race, in first-appearance order.
        let mut outgoing: Vec<(RaceKey, u64)> = Vec::new();
        let mut slots: AHashMap<&RaceKey, usize> = AHashMap::new();
        for &i in &sources {
            let source = &table.rows()[i];
            let slot = *slots.entry(&source.key).or_insert_with(|| {
                outgoing.push((source.key.clone(), 0));
                outgoing.len() - 1
            });
            outgoing[slot].1 += source.votes;
            rows[i].votes = 0;
        }

        let mut transfers = Vec::with_capacity(outgoing.len());
        for (key, votes) in outgoing {
            let transfer = match self.strongest_recipient(rows, &key) {
                Some(i) => {
                    rows[i].votes += votes;
                    Transfer { recipient: rows[i].candidate.clone(), key, votes, synthetic: false }
                }
                None => {
                    let row = CandidateResult::synthetic(key.clone(), self.to_party.clone(), votes);
                    let recipient = row.candidate.clone();
                    rows.push(row);
                    Transfer { recipient, key, votes, synthetic: true }
                }
            };
            transfers.push(transfer);
        }

        refresh_percentages(rows, &transfers);
        for row in rows.iter_mut() { row.annotation = None }

        tracing::info!(
            rows_zeroed = sources.len(),
            races = transfers.len(),
            votes_moved = transfers.iter().map(|t| t.votes).sum::<u64>(),
            synthetic = transfers.iter().filter(|t| t.synthetic).count(),
            to = %self.to_party,
            "redistributed votes"
        );

        let aggregation = aggregate(&next);
        let mut reported = Reported::new(Simulation::from_aggregation(aggregation.value, transfers));
        reported.warnings = aggregation.warnings;
        reported
    }

    /// Zero-vote rows have nothing to move, so a repeated transfer finds no sources.
    fn is_source(&self, row: &CandidateResult) -> bool {
        row.votes > 0
            && row.party.as_ref().is_some_and(|party| self.from_parties.contains(party))
            && self.filter.matches(&row.key)
    }

    /// Destination-party row with the most votes in the race; first on ties.
    /// Searches the whole table, not only the filtered rows.
    fn strongest_recipient(&self, rows: &[CandidateResult], key: &RaceKey) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, row) in rows.iter().enumerate() {
            if &row.key != key || !row.has_party(&self.to_party) { continue }
            if best.is_none_or(|b| row.votes > rows[b].votes) { best = Some(i) }
        }
        best
    }

    fn no_match_warning(&self) -> Warning {
        Warning::NoMatchingSource {
            from_parties: self.from_parties.iter().map(Party::to_string).collect(),
            state: self.filter.state.clone(),
            district: self.filter.district.clone(),
        }
    }
}

impl TryFrom<&RedistributionRequest> for Redistribution {
    type Error = ElectionError;

    fn try_from(request: &RedistributionRequest) -> Result<Self> {
        let from_parties = request.from_parties.iter()
            .map(|raw| Party::parse(raw)
                .ok_or_else(|| ElectionError::InvalidRequest(format!("source party {raw:?} is blank"))))
            .collect::<Result<Vec<Party>>>()?;
        let to_party = Party::parse(&request.to_party)
            .ok_or_else(|| ElectionError::InvalidRequest("destination party is required".into()))?;

        let mut redistribution = Self::new(from_parties, to_party)?;
        if let Some(state) = &request.state { redistribution = redistribution.in_state(state) }
        if let Some(district) = &request.district { redistribution = redistribution.in_district(district) }
        Ok(redistribution)
    }
}

/// Validate `request` and apply it to `table`.
pub fn redistribute(table: &CandidateTable, request: &RedistributionRequest) -> Result<Reported<Simulation>> {
    let redistribution = Redistribution::try_from(request)?;
    Ok(redistribution.apply(table))
}

/// Reported percentages of rows in touched races become their new vote share × 100.
fn refresh_percentages(rows: &mut [CandidateResult], transfers: &[Transfer]) {
    let touched: ahash::AHashSet<&RaceKey> = transfers.iter().map(|t| &t.key).collect();
    for group in group_rows(rows) {
        if !touched.contains(&group.key) { continue }
        let total: u64 = group.members.iter().map(|&i| rows[i].votes).sum();
        for &i in &group.members {
            rows[i].percentage = Some(share(rows[i].votes, total) * 100.0);
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(label: &str) -> Party { Party::parse(label).unwrap() }

    fn row(state: &str, district: &str, candidate: &str, label: &str, votes: u64) -> CandidateResult {
        CandidateResult::new(RaceKey::new(state, district), candidate, Party::parse(label), votes, Some(1.0))
    }

    #[test]
    fn new_requires_a_source_party() {
        assert!(matches!(Redistribution::new([], party("D")), Err(ElectionError::InvalidRequest(_))));
    }

    #[test]
    fn request_parties_are_normalized() {
        let request = RedistributionRequest {
            from_parties: vec!["green party".into(), "Libertarian".into()],
            to_party: "democratic".into(),
            state: Some(" Ohio ".into()),
            district: Some("".into()),
        };
        let redistribution = Redistribution::try_from(&request).unwrap();
        assert!(redistribution.from_parties().contains(&party("Green")));
        assert_eq!(redistribution.to_party().as_str(), "D");
        assert_eq!(redistribution.filter().state.as_deref(), Some("Ohio"));
        assert_eq!(redistribution.filter().district, None);
    }

    #[test]
    fn blank_destination_is_rejected() {
        let request = RedistributionRequest { from_parties: vec!["Green".into()], to_party: "  ".into(), ..Default::default() };
        assert!(matches!(Redistribution::try_from(&request), Err(ElectionError::InvalidRequest(_))));
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let request: RedistributionRequest =
            serde_json::from_str(r#"{ "fromParties": ["Green"], "toParty": "D", "district": "4" }"#).unwrap();
        assert_eq!(request.from_parties, ["Green"]);
        assert_eq!(request.state, None);
        assert_eq!(request.district.as_deref(), Some("4"));
    }

    #[test]
    fn filter_matches_exactly() {
        let filter = RaceFilter { state: Some("Ohio".into()), district: None };
        assert!(filter.matches(&RaceKey::new("Ohio", "9")));
        assert!(!filter.matches(&RaceKey::new("ohio", "9")));
        assert!(RaceFilter::default().matches(&RaceKey::new("Utah", "1")));
    }

    #[test]
    fn strongest_recipient_prefers_first_on_ties() {
        let rows = vec![
            row("Ohio", "1", "A", "D", 30),
            row("Ohio", "2", "Z", "D", 99),
            row("Ohio", "1", "B", "D", 30),
            row("Ohio", "1", "C", "R", 50),
        ];
        let redistribution = Redistribution::new([party("Green")], party("D")).unwrap();
        assert_eq!(redistribution.strongest_recipient(&rows, &RaceKey::new("Ohio", "1")), Some(0));
        assert_eq!(redistribution.strongest_recipient(&rows, &RaceKey::new("Utah", "1")), None);
    }

    #[test]
    fn percentages_refresh_only_in_touched_races() {
        let table = CandidateTable::new(vec![
            row("Ohio", "1", "A", "D", 60),
            row("Ohio", "1", "G", "Green", 40),
            row("Utah", "1", "U", "R", 10),
        ]);
        let simulation = Redistribution::new([party("Green")], party("D")).unwrap().apply(&table).value;
        let rows = simulation.table.rows();
        assert_eq!(rows[0].percentage, Some(100.0));
        assert_eq!(rows[1].percentage, Some(0.0));
        assert_eq!(rows[2].percentage, Some(1.0));
    }

    #[test]
    fn synthetic_rows_are_appended_and_flagged() {
        let table = CandidateTable::new(vec![
            row("Ohio", "1", "A", "R", 60),
            row("Ohio", "1", "G", "Green", 40),
        ]);
        let simulation = Redistribution::new([party("Green")], party("Libertarian")).unwrap().apply(&table).value;
        let new_row = simulation.table.rows().last().unwrap();
        assert!(new_row.synthetic);
        assert_eq!(new_row.candidate, "New Libertarian Candidate");
        assert_eq!(new_row.votes, 40);
        assert_eq!(simulation.transfers.len(), 1);
        assert!(simulation.transfers[0].synthetic);
        assert_eq!(simulation.votes_moved(), 40);
    }
}
