use std::{fmt, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A canonical party label.
///
/// Labels are always produced by [`Party::parse`], so two spellings of the
/// same party ("Democratic", " democrat ") compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Party(Arc<str>);

impl Party {
    pub const DEMOCRATIC: &'static str = "D";
    pub const REPUBLICAN: &'static str = "R";
    pub const GREEN: &'static str = "Green";

    /// Normalize a raw party name into its canonical label.
    ///
    /// Matching is case- and whitespace-insensitive:
    /// - anything containing "green" becomes `Green`
    /// - "democrat" / "democratic" become `D`
    /// - "republican" becomes `R`
    /// - everything else is title-cased
    ///
    /// Blank names are unlabeled and return `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() { return None }

        let label = if name.contains("green") {
            Self::GREEN.to_string()
        } else if name == "democrat" || name == "democratic" {
            Self::DEMOCRATIC.to_string()
        } else if name == "republican" {
            Self::REPUBLICAN.to_string()
        } else {
            title_case(&name)
        };

        Some(Self(label.into()))
    }

    /// The canonical label text.
    #[inline] pub fn as_str(&self) -> &str { &self.0 }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word { out.extend(ch.to_lowercase()) } else { out.extend(ch.to_uppercase()) }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Party {
    fn as_ref(&self) -> &str { &self.0 }
}

impl Serialize for Party {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Party {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Party::parse(&raw).ok_or_else(|| serde::de::Error::custom("party label must not be blank"))
    }
}
