use std::fmt;

use serde::Serialize;

/// Result type for fallible engine operations.
pub type Result<T> = std::result::Result<T, ElectionError>;

/// Fatal errors. Recoverable conditions are reported as [`Warning`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum ElectionError {
    /// A required field is missing or unparseable; the whole input batch is rejected.
    #[error("malformed record ({state}, {district}, {candidate}): {reason}")]
    MalformedRecord {
        state: String,
        district: String,
        candidate: String,
        reason: String,
    },

    /// A request that cannot be applied to any table (e.g. no source parties).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid source JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal conditions reported next to a best-effort result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A percentage could not be parsed and was recorded as unknown.
    UnparseablePercentage {
        state: String,
        district: String,
        candidate: String,
        raw: String,
    },
    /// A redistribution matched no source rows; the table was returned unchanged.
    NoMatchingSource {
        from_parties: Vec<String>,
        state: Option<String>,
        district: Option<String>,
    },
    /// Aggregation or tally ran over zero races.
    EmptyRaceSet,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnparseablePercentage { state, district, candidate, raw } =>
                write!(f, "unparseable percentage {raw:?} for {candidate} ({state}, {district}); recorded as unknown"),
            Warning::NoMatchingSource { from_parties, state, district } =>
                write!(f, "no candidates of [{}] within state={} district={}; table unchanged",
                    from_parties.join(", "),
                    state.as_deref().unwrap_or("*"),
                    district.as_deref().unwrap_or("*")),
            Warning::EmptyRaceSet =>
                write!(f, "no races to aggregate"),
        }
    }
}

/// A value together with the warnings raised while producing it.
#[derive(Debug, Clone)]
pub struct Reported<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Reported<T> {
    pub fn new(value: T) -> Self {
        Self { value, warnings: Vec::new() }
    }

    /// Record a warning and emit it as a `warn` event.
    pub(crate) fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    #[inline] pub fn has_warning(&self, matches: impl Fn(&Warning) -> bool) -> bool {
        self.warnings.iter().any(matches)
    }
}
