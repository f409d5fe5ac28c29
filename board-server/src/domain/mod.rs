//! Domain types for the station board.
//!
//! These types represent validated provider data. Codes and timestamps are
//! checked at construction, so code that receives them can trust them.

mod station;
mod time;
mod train;

pub use station::{InvalidStationCode, Station, StationCode};
pub use time::{
    TimeError, Timestamp, format_board_time, format_meridiem, format_updated_at, parse_timestamp,
};
pub use train::{BoardKind, ScheduledTrain, StationStop, Train, TrainId};
