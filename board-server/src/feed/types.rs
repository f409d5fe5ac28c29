//! Provider feed DTOs.
//!
//! The directory files are read as raw JSON objects first and each record
//! is deserialized on its own, so a record with a null or mistyped field
//! only costs that record. The record types use `Option` liberally because
//! the provider omits fields (or sends empty strings) rather than sending
//! nulls.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Station directory: station code → raw station record.
pub type StationsResponse = Map<String, Value>;

/// Train directory: train number → raw list of every active run of that
/// number.
pub type TrainsResponse = Map<String, Value>;

/// Entries of a directory in the order a browser enumerates a JSON object:
/// integer keys ascending, then every other key in document order.
pub fn directory_entries(directory: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut entries: Vec<_> = directory.iter().map(|(k, v)| (k.as_str(), v)).collect();
    // Stable, so non-integer keys keep document order.
    entries.sort_by_key(|(key, _)| {
        let index = array_index(key);
        (index.is_none(), index)
    });
    entries
}

/// The key as an array index: canonical decimal below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    key.parse::<u32>()
        .ok()
        .filter(|&n| n != u32::MAX && n.to_string() == key)
}

/// A station in the station directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    /// Human-readable station name.
    pub name: String,

    /// Three-letter station code.
    pub code: String,

    /// IANA timezone name of the station.
    pub tz: Option<String>,

    pub city: Option<String>,

    pub state: Option<String>,

    /// IDs of the trains currently serving this station.
    #[serde(default)]
    pub trains: Vec<String>,
}

/// Train numbers arrive as JSON numbers from some endpoints and as
/// strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TrainNumber {
    Number(u32),
    Text(String),
}

/// One run of a train.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainDto {
    /// Route name (e.g. "Northeast Regional").
    pub route_name: String,

    pub train_num: TrainNumber,

    /// Stable ID for this run (e.g. "171-1").
    #[serde(rename = "trainID")]
    pub train_id: String,

    /// Origin station name.
    pub orig_name: Option<String>,

    /// Destination station name.
    pub dest_name: Option<String>,

    /// "Active", "Predeparture", "Completed", ...
    pub train_state: Option<String>,

    /// Every stop on the run, in order, as raw [`StationStopDto`] records.
    #[serde(default)]
    pub stations: Vec<Value>,
}

/// One stop of a train run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStopDto {
    pub name: Option<String>,

    /// Three-letter station code.
    pub code: String,

    pub tz: Option<String>,

    /// Scheduled arrival (RFC 3339).
    pub sch_arr: Option<String>,

    /// Scheduled departure (RFC 3339).
    pub sch_dep: Option<String>,

    /// Actual or estimated arrival (RFC 3339).
    pub arr: Option<String>,

    /// Actual or estimated departure (RFC 3339).
    pub dep: Option<String>,

    /// Arrival comment, e.g. "10 Minutes Late".
    pub arr_cmnt: Option<String>,

    /// Departure comment, e.g. "On Time" or "NaN Minutes Early".
    pub dep_cmnt: Option<String>,

    /// "Enroute", "Station", "Departed", ...
    pub status: Option<String>,
}
