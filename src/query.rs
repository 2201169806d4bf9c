//! Query Answering: "N districts with the smallest margin of victory".
//!
//! This is a closed classifier: anything that does not ask for the closest
//! races gets the fixed unsupported answer.

use std::sync::LazyLock;

use ahash::AHashSet;
use regex::Regex;
use serde::Serialize;

use crate::{aggregate::DistrictRace, table::CandidateTable, types::RaceKey};

/// Number of races returned when the question names no count.
pub const DEFAULT_RANK_COUNT: usize = 5;

/// Reply to any question outside the supported shape.
pub const UNSUPPORTED_MESSAGE: &str = "Sorry, I can only answer questions about the smallest margins of victory.";

static CLOSEST_RACES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(smallest\s+margins?|closest\s+(races?|districts?|contests?))\b").expect("valid regex")
});

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

static NUMBER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty)\b")
        .expect("valid regex")
});

/// A recognized question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    SmallestMargins { n: usize },
}

/// One ranked race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarginEntry {
    #[serde(flatten)]
    pub key: RaceKey,
    pub margin_of_victory: u64,
}

/// Result of answering a free-text question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    SmallestMargins { n: usize, races: Vec<MarginEntry> },
    Unsupported,
}

impl Answer {
    #[inline] pub fn is_supported(&self) -> bool { !matches!(self, Answer::Unsupported) }
}

/// Recognize a closest-races question and pull the requested count out of it.
pub fn classify(text: &str) -> Option<Query> {
    if !CLOSEST_RACES.is_match(text) { return None }
    Some(Query::SmallestMargins { n: requested_count(text).unwrap_or(DEFAULT_RANK_COUNT) })
}

/// First integer in the text, else the first number word.
fn requested_count(text: &str) -> Option<usize> {
    if let Some(digits) = FIRST_NUMBER.find(text) {
        return digits.as_str().parse().ok();
    }
    let word = NUMBER_WORD.find(text)?.as_str().to_lowercase();
    let value = match word.as_str() {
        "one" => 1, "two" => 2, "three" => 3, "four" => 4, "five" => 5,
        "six" => 6, "seven" => 7, "eight" => 8, "nine" => 9, "ten" => 10,
        "eleven" => 11, "twelve" => 12, "thirteen" => 13, "fourteen" => 14, "fifteen" => 15,
        "sixteen" => 16, "seventeen" => 17, "eighteen" => 18, "nineteen" => 19, "twenty" => 20,
        _ => return None,
    };
    Some(value)
}

/// The `n` races with the smallest margins, ascending.
///
/// Races are deduplicated by key (first occurrence kept) before ranking;
/// equal margins keep their input order. Asking for more races than exist
/// returns all of them.
pub fn smallest_margins<'a>(margins: impl IntoIterator<Item = (&'a RaceKey, u64)>, n: usize) -> Vec<MarginEntry> {
    let mut seen: AHashSet<&RaceKey> = AHashSet::new();
    let mut entries: Vec<MarginEntry> = margins.into_iter()
        .filter(|(key, _)| seen.insert(*key))
        .map(|(key, margin_of_victory)| MarginEntry { key: key.clone(), margin_of_victory })
        .collect();

    entries.sort_by_key(|entry| entry.margin_of_victory);
    entries.truncate(n);
    entries
}

/// Answer a free-text question over a race collection.
pub fn answer(races: &[DistrictRace], text: &str) -> Answer {
    match classify(text) {
        Some(Query::SmallestMargins { n }) => {
            tracing::debug!(n, races = races.len(), "ranking smallest margins");
            let margins = races.iter().map(|race| (&race.key, race.margin_of_victory));
            Answer::SmallestMargins { n, races: smallest_margins(margins, n) }
        }
        None => Answer::Unsupported,
    }
}

impl CandidateTable {
    /// (race, margin) pairs of an annotated table, one per row.
    /// Rows without annotations are skipped.
    pub fn margins(&self) -> impl Iterator<Item = (&RaceKey, u64)> {
        self.iter().filter_map(|row| {
            row.annotation.as_ref().map(|annotation| (&row.key, annotation.margin_of_victory))
        })
    }
}
