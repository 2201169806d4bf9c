#![doc = "House election results engine: district winners, margins, seat tallies and vote redistribution"]
mod aggregate;
mod error;
mod geokey;
mod io;
mod normalize;
mod query;
mod redistribute;
mod table;
mod tally;
mod types;

#[doc(inline)]
pub use types::{Party, RaceKey};

#[doc(inline)]
pub use error::{ElectionError, Reported, Result, Warning};

#[doc(inline)]
pub use table::{Annotation, CandidateResult, CandidateTable, Catalogs};

#[doc(inline)]
pub use normalize::{normalize, normalize_json, Normalized, RawCandidate, RawDistrict, RawState};

#[doc(inline)]
pub use aggregate::{aggregate, Aggregation, CandidateShare, DistrictRace};

#[doc(inline)]
pub use tally::{PartySeats, SeatTally};

#[doc(inline)]
pub use redistribute::{redistribute, RaceFilter, Redistribution, RedistributionRequest, Simulation, Transfer};

#[doc(inline)]
pub use query::{answer, classify, smallest_margins, Answer, MarginEntry, Query, DEFAULT_RANK_COUNT, UNSUPPORTED_MESSAGE};

#[doc(inline)]
pub use geokey::{district_number, state_name};

#[doc(inline)]
pub use io::{
    margins_to_dataframe, races_to_dataframe, read_source_json, read_source_str, transfers_to_dataframe,
    write_csv, write_csv_string, write_json, OutputFormat,
};

#[cfg(feature = "parquet")]
#[doc(inline)]
pub use io::write_parquet;
