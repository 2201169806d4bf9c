mod party;
mod race_key;

pub use party::Party;
pub use race_key::RaceKey;

pub(crate) use party::title_case;
