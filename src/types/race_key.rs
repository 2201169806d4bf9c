use std::{fmt, sync::Arc};

use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::geokey::district_number;
use super::title_case;

/// Identifies a single race: one (state, district) pair.
/// Keeps the identifiers exactly as they appeared in the source (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RaceKey {
    pub state: Arc<str>,
    pub district: Arc<str>,
}

impl RaceKey {
    pub fn new(state: impl AsRef<str>, district: impl AsRef<str>) -> Self {
        Self {
            state: Arc::from(state.as_ref().trim()),
            district: Arc::from(district.as_ref().trim()),
        }
    }

    #[inline] pub fn state(&self) -> &str { &self.state }

    #[inline] pub fn district(&self) -> &str { &self.district }

    /// Key used to join this race against district boundary geometries:
    /// title-cased state name and the numeric district code ("0" for at-large).
    pub fn geometry_key(&self) -> (String, String) {
        (title_case(&self.state), district_number(&self.district))
    }
}

impl fmt::Display for RaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.state, self.district)
    }
}

impl Serialize for RaceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut key = serializer.serialize_struct("RaceKey", 2)?;
        key.serialize_field("state", self.state())?;
        key.serialize_field("district", self.district())?;
        key.end()
    }
}
