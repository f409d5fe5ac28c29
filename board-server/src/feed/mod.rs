//! Provider feed: DTOs, conversion and the shared snapshot.
//!
//! An external fetcher keeps `stations.json` and `trains.json` current in a
//! data directory. We read them on a timer, convert them to domain types,
//! and swap the resulting snapshot in for readers.
//!
//! Key characteristics of the provider data:
//! - Station and train directories are separate; stations list the IDs of
//!   the trains serving them
//! - Times are RFC 3339 with the station's own UTC offset
//! - Fields are often omitted or sent as empty strings
//! - A single malformed record is skipped, never the whole file

mod convert;
mod error;
mod snapshot;
mod source;
mod types;

pub use convert::{
    ConversionError, convert_station, convert_stations, convert_train, convert_trains,
};
pub use error::FeedError;
pub use snapshot::FeedSnapshot;
pub use source::{
    DirectorySource, FeedSource, FeedStatus, RefreshSummary, STATIONS_FILE, SharedFeed,
    TRAINS_FILE,
};
pub use types::{
    StationDto, StationStopDto, StationsResponse, TrainDto, TrainNumber, TrainsResponse,
    directory_entries,
};
