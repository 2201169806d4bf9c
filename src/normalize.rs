//! Record Normalizer: nested per-state source records → flat candidate table.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::{
    error::{ElectionError, Reported, Result, Warning},
    table::{CandidateResult, CandidateTable, Catalogs},
    types::{Party, RaceKey},
};

/// One state entry of the nested source structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawState {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub districts: Vec<RawDistrict>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDistrict {
    /// String or integer district identifier.
    #[serde(default)]
    pub district: Option<Value>,
    #[serde(default)]
    pub candidates: Vec<RawCandidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub candidate: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub votes: Option<Value>,
    #[serde(default)]
    pub percentage: Option<Value>,
}

/// Output of normalization: the canonical table and its selection catalogs.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub table: CandidateTable,
    pub catalogs: Catalogs,
}

/// Flatten the nested source into a candidate table.
///
/// Fails on the first record with a missing state/district or a missing or
/// unparseable vote count; no partial table is returned. Unparseable
/// percentages are recorded as unknown and reported as warnings.
pub fn normalize(source: &[RawState]) -> Result<Reported<Normalized>> {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for state_entry in source {
        let state = state_entry.state.as_deref().map(str::trim).filter(|s| !s.is_empty());

        for district_entry in &state_entry.districts {
            let district = district_entry.district.as_ref().and_then(district_id);

            for raw in &district_entry.candidates {
                let candidate = raw.candidate.as_deref().unwrap_or_default().trim().to_string();
                let malformed = |reason: String| ElectionError::MalformedRecord {
                    state: state.unwrap_or("<missing>").to_string(),
                    district: district.clone().unwrap_or_else(|| "<missing>".into()),
                    candidate: candidate.clone(),
                    reason,
                };

                let Some(state) = state else { return Err(malformed("state is missing".into())) };
                let Some(district) = district.as_deref() else { return Err(malformed("district is missing".into())) };
                let votes = parse_votes(raw.votes.as_ref()).map_err(malformed)?;

                let percentage = match parse_percentage(raw.percentage.as_ref()) {
                    ParsedPercentage::Known(value) => Some(value),
                    ParsedPercentage::Blank => None,
                    ParsedPercentage::Invalid(text) => {
                        warnings.push(Warning::UnparseablePercentage {
                            state: state.to_string(),
                            district: district.to_string(),
                            candidate: candidate.clone(),
                            raw: text,
                        });
                        None
                    }
                };

                let party = raw.party.as_deref().and_then(Party::parse);
                rows.push(CandidateResult::new(RaceKey::new(state, district), candidate, party, votes, percentage));
            }
        }
    }

    let table = CandidateTable::new(rows);
    let catalogs = table.catalogs();
    tracing::debug!(
        rows = table.len(),
        parties = catalogs.parties.len(),
        states = catalogs.states.len(),
        "normalized source records"
    );

    let mut reported = Reported::new(Normalized { table, catalogs });
    for warning in warnings { reported.warn(warning) }
    Ok(reported)
}

/// Parse JSON source text and normalize it.
pub fn normalize_json(json: &str) -> Result<Reported<Normalized>> {
    let source: Vec<RawState> = serde_json::from_str(json)?;
    normalize(&source)
}

/// District identifiers may be strings or numbers in the source.
fn district_id(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(number) => Some(match integral(number) {
            Some(id) => id.to_string(),
            None => number.to_string(),
        }),
        _ => None,
    }
}

/// A non-negative whole number, whether JSON wrote it as `3` or `3.0`.
fn integral(number: &Number) -> Option<u64> {
    number.as_u64().or_else(|| {
        number.as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Parse a vote count: a non-negative integer, an integral float, or a numeric string.
fn parse_votes(value: Option<&Value>) -> std::result::Result<u64, String> {
    match value {
        None | Some(Value::Null) => Err("votes is missing".into()),
        Some(Value::Number(number)) => integral(number)
            .ok_or_else(|| format!("votes must be a non-negative integer, got {number}")),
        Some(Value::String(text)) => text.trim().parse::<u64>()
            .map_err(|_| format!("votes must be a non-negative integer, got {text:?}")),
        Some(other) => Err(format!("votes must be a number, got {other}")),
    }
}

#[derive(Debug, PartialEq)]
enum ParsedPercentage {
    Known(f64),
    Blank,
    Invalid(String),
}

fn parse_percentage(value: Option<&Value>) -> ParsedPercentage {
    match value {
        None | Some(Value::Null) => ParsedPercentage::Blank,
        Some(Value::Number(number)) => match number.as_f64() {
            Some(value) => ParsedPercentage::Known(value),
            None => ParsedPercentage::Invalid(number.to_string()),
        },
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() { return ParsedPercentage::Blank }
            match trimmed.trim_end_matches('%').trim_end().parse::<f64>() {
                Ok(value) if value.is_finite() => ParsedPercentage::Known(value),
                _ => ParsedPercentage::Invalid(text.clone()),
            }
        }
        Some(other) => ParsedPercentage::Invalid(other.to_string()),
    }
}
