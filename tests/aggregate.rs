use approx::assert_relative_eq;
use housesim::{aggregate, normalize_json, CandidateResult, CandidateTable, Party, RaceKey, Warning};

/// Three-way race in Ohio plus a close two-way race in Utah.
fn table() -> CandidateTable {
    let ohio = RaceKey::new("Ohio", "1");
    let utah = RaceKey::new("Utah", "2");
    CandidateTable::new(vec![
        CandidateResult::new(ohio.clone(), "A", Party::parse("Democratic"), 600, Some(57.1)),
        CandidateResult::new(ohio.clone(), "B", Party::parse("Republican"), 400, Some(38.1)),
        CandidateResult::new(ohio, "C", Party::parse("Green Party"), 50, Some(4.8)),
        CandidateResult::new(utah.clone(), "D", Party::parse("Republican"), 310, None),
        CandidateResult::new(utah, "E", Party::parse("Democrat"), 300, None),
    ])
}

#[test]
fn three_way_race_winner_margin_and_shares() {
    let aggregation = aggregate(&table()).value;
    let ohio = &aggregation.races[0];

    assert_eq!(ohio.total_votes, 1050);
    assert_eq!(ohio.winner_name, "A");
    assert_eq!(ohio.winner_party.as_ref().map(Party::as_str), Some("D"));
    assert_eq!(ohio.winner_votes, 600);
    assert_eq!(ohio.margin_of_victory, 200);

    let shares: Vec<f64> = aggregation.table.iter()
        .filter(|row| row.key == ohio.key)
        .filter_map(CandidateResult::vote_share)
        .collect();
    assert_eq!(shares.len(), 3);
    assert_relative_eq!(shares[0], 0.571, epsilon = 1e-3);
    assert_relative_eq!(shares[1], 0.381, epsilon = 1e-3);
    assert_relative_eq!(shares[2], 0.048, epsilon = 1e-3);
}

#[test]
fn every_row_carries_its_race_values() {
    let aggregation = aggregate(&table()).value;
    for race in &aggregation.races {
        let rows: Vec<&CandidateResult> = aggregation.table.iter().filter(|row| row.key == race.key).collect();
        let share_sum: f64 = rows.iter().filter_map(|row| row.vote_share()).sum();
        assert_relative_eq!(share_sum, 1.0, epsilon = 1e-9);
        for row in rows {
            let annotation = row.annotation.as_ref().unwrap();
            assert_eq!(annotation.total_votes, race.total_votes);
            assert_eq!(annotation.winner_name, race.winner_name);
            assert_eq!(annotation.margin_of_victory, race.margin_of_victory);
            assert!(annotation.winner_votes >= row.votes);
        }
    }
}

#[test]
fn one_race_per_distinct_key_in_first_appearance_order() {
    let aggregation = aggregate(&table()).value;
    let keys: Vec<String> = aggregation.races.iter().map(|race| race.key.to_string()).collect();
    assert_eq!(keys, ["Ohio-1", "Utah-2"]);
    assert_eq!(aggregation.num_races(), aggregation.table.race_keys().len());
}

#[test]
fn aggregation_is_idempotent() {
    let once = aggregate(&table()).value;
    let twice = aggregate(&once.table).value;
    assert_eq!(once.table, twice.table);
    assert_eq!(once.races, twice.races);
}

#[test]
fn empty_table_warns_and_yields_no_races() {
    let aggregation = aggregate(&CandidateTable::default());
    assert!(aggregation.value.races.is_empty());
    assert!(aggregation.has_warning(|w| matches!(w, Warning::EmptyRaceSet)));
}

#[test]
fn aggregates_normalized_source() {
    let normalized = normalize_json(r#"[
        { "state": "Iowa", "districts": [
            { "district": 4, "candidates": [
                { "candidate": "Solo", "party": "Republican", "votes": "1200", "percentage": "100%" }
            ] }
        ] }
    ]"#).unwrap();
    let aggregation = aggregate(&normalized.value.table).value;
    let race = &aggregation.races[0];
    assert!(race.is_uncontested());
    assert_eq!(race.margin_of_victory, 1200);
    assert_relative_eq!(race.winner_share_percent(), 100.0);
}

#[test]
fn race_detail_lists_winner_then_the_rest() {
    let aggregation = aggregate(&table()).value;
    let ohio = &aggregation.races[0];

    assert_eq!(ohio.winner().candidate, "A");
    assert_eq!(ohio.runner_up().map(|c| c.candidate.as_str()), Some("B"));
    let others: Vec<&str> = ohio.other_candidates().map(|c| c.candidate.as_str()).collect();
    assert_eq!(others, ["B", "C"]);
    assert_relative_eq!(ohio.winner_share_percent(), 600.0 / 1050.0 * 100.0, epsilon = 1e-9);
}
