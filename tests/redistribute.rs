use approx::assert_relative_eq;
use housesim::{
    aggregate, redistribute, CandidateResult, CandidateTable, ElectionError, Party, RaceKey,
    Redistribution, RedistributionRequest, Warning,
};

fn party(label: &str) -> Party { Party::parse(label).unwrap() }

fn row(state: &str, district: &str, name: &str, label: &str, votes: u64) -> CandidateResult {
    CandidateResult::new(RaceKey::new(state, district), name, Party::parse(label), votes, None)
}

/// Aggregated two-race table: Ohio-1 is A(D) 600, B(R) 400, C(Green) 50.
fn table() -> CandidateTable {
    let rows = vec![
        row("Ohio", "1", "A", "D", 600),
        row("Ohio", "1", "B", "R", 400),
        row("Ohio", "1", "C", "Green", 50),
        row("Utah", "2", "D", "R", 700),
        row("Utah", "2", "E", "D", 650),
    ];
    aggregate(&CandidateTable::new(rows)).value.table
}

fn request(from: &[&str], to: &str) -> RedistributionRequest {
    RedistributionRequest {
        from_parties: from.iter().map(|s| s.to_string()).collect(),
        to_party: to.into(),
        state: None,
        district: None,
    }
}

fn votes_of(table: &CandidateTable, name: &str) -> u64 {
    table.iter().find(|row| row.candidate == name).map(|row| row.votes).unwrap()
}

#[test]
fn green_to_democratic_concentrates_on_existing_candidate() {
    let simulation = redistribute(&table(), &request(&["Green"], "Democratic")).unwrap().value;

    assert_eq!(votes_of(&simulation.table, "C"), 0);
    assert_eq!(votes_of(&simulation.table, "A"), 650);

    let ohio = &simulation.races[0];
    assert_eq!(ohio.total_votes, 1050);
    assert_eq!(ohio.winner_name, "A");
    assert_eq!(ohio.margin_of_victory, 250);
    assert_eq!(simulation.votes_moved(), 50);
    assert_eq!(simulation.table.len(), 5);
}

#[test]
fn missing_destination_party_creates_synthetic_candidate() {
    let simulation = redistribute(&table(), &request(&["Green"], "Independent")).unwrap().value;

    let created: Vec<&CandidateResult> = simulation.table.iter().filter(|row| row.synthetic).collect();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].candidate, "New Independent Candidate");
    assert_eq!(created[0].party, Some(party("Independent")));
    assert_eq!(created[0].votes, 50);
    assert_eq!(created[0].key, RaceKey::new("Ohio", "1"));
    assert_eq!(simulation.races[0].total_votes, 1050);
    assert!(simulation.transfers[0].synthetic);
}

#[test]
fn grand_total_and_race_set_are_preserved() {
    let before = table();
    let simulation = redistribute(&before, &request(&["Green", "Republican"], "D")).unwrap().value;

    assert_eq!(simulation.table.total_votes(), before.total_votes());
    assert_eq!(simulation.table.race_keys(), before.race_keys());
    assert_eq!(simulation.tally().value.total_races(), 2);
}

#[test]
fn untouched_races_are_unchanged() {
    let before = table();
    let mut req = request(&["Republican"], "Green");
    req.state = Some("Utah".into());
    let simulation = redistribute(&before, &req).unwrap().value;

    let ohio = RaceKey::new("Ohio", "1");
    let old: Vec<&CandidateResult> = before.race_rows(&ohio).collect();
    let new: Vec<&CandidateResult> = simulation.table.race_rows(&ohio).collect();
    assert_eq!(old, new);

    // Utah now has a synthetic Green winner with all 700 Republican votes.
    let utah = &simulation.races[1];
    assert_eq!(utah.winner_name, "New Green Candidate");
    assert_eq!(utah.winner_votes, 700);
    assert_eq!(utah.margin_of_victory, 50);
}

#[test]
fn touched_race_percentages_are_recomputed() {
    let simulation = redistribute(&table(), &request(&["Green"], "D")).unwrap().value;
    let a = simulation.table.iter().find(|row| row.candidate == "A").unwrap();
    assert_relative_eq!(a.percentage.unwrap(), 650.0 / 1050.0 * 100.0, epsilon = 1e-9);
    let d = simulation.table.iter().find(|row| row.candidate == "D").unwrap();
    assert_eq!(d.percentage, None);
}

#[test]
fn second_application_is_a_no_op() {
    let once = redistribute(&table(), &request(&["Green"], "D")).unwrap().value;
    let twice = redistribute(&once.table, &request(&["Green"], "D")).unwrap();

    assert_eq!(twice.value.table, once.table);
    assert!(twice.value.is_unchanged());
    assert!(twice.has_warning(|w| matches!(w, Warning::NoMatchingSource { .. })));
}

#[test]
fn filter_with_no_matching_race_warns() {
    let before = table();
    let simulation = Redistribution::new([party("Green")], party("D")).unwrap()
        .in_state("Nevada")
        .apply(&before);

    assert_eq!(simulation.value.table, before);
    assert!(simulation.has_warning(|w| matches!(w, Warning::NoMatchingSource { state: Some(s), .. } if s == "Nevada")));
}

#[test]
fn no_match_on_raw_table_still_returns_annotated_rows() {
    let raw = CandidateTable::new(vec![row("Ohio", "1", "A", "D", 600), row("Ohio", "1", "B", "R", 400)]);
    let simulation = redistribute(&raw, &request(&["Green"], "D")).unwrap();

    assert!(simulation.has_warning(|w| matches!(w, Warning::NoMatchingSource { .. })));
    let table = &simulation.value.table;
    assert!(table.is_annotated());
    assert_eq!(table.iter().map(|r| r.votes).collect::<Vec<_>>(), [600, 400]);
    let annotation = table.rows()[1].annotation.as_ref().unwrap();
    assert_eq!(annotation.winner_name, "A");
    assert_eq!(annotation.margin_of_victory, 200);
    assert_eq!(simulation.value.races[0].margin_of_victory, 200);
}

#[test]
fn district_filter_restricts_to_one_race() {
    let before = table();
    let simulation = Redistribution::new([party("D")], party("R")).unwrap()
        .in_state("Utah")
        .in_district("2")
        .apply(&before)
        .value;

    assert_eq!(votes_of(&simulation.table, "A"), 600);
    assert_eq!(votes_of(&simulation.table, "D"), 1350);
    assert_eq!(simulation.transfers.len(), 1);
}

#[test]
fn empty_source_set_is_rejected() {
    assert!(matches!(
        redistribute(&table(), &request(&[], "D")),
        Err(ElectionError::InvalidRequest(_)),
    ));
    assert!(matches!(
        redistribute(&table(), &request(&["Green"], "  ")),
        Err(ElectionError::InvalidRequest(_)),
    ));
}

#[test]
fn result_seat_tally_reflects_flipped_race() {
    let simulation = redistribute(&table(), &request(&["Democratic"], "Republican")).unwrap().value;
    let tally = simulation.tally().value;
    assert_eq!(tally.seats(Some(&party("R"))), 2);
    assert_eq!(tally.seats(Some(&party("D"))), 0);
}
