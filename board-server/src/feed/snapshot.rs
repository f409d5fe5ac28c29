//! One consistent view of the station and train directories.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::board::{BoardWindow, StationBoard};
use crate::domain::{ScheduledTrain, Station, StationCode, Train};

use super::convert::{convert_stations, convert_trains};
use super::types::{StationsResponse, TrainsResponse};

/// Station and train directories taken from the same refresh.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    stations: Vec<Station>,
    index: HashMap<StationCode, usize>,
    trains: Vec<Train>,
}

impl FeedSnapshot {
    /// Build a snapshot. If a station code appears twice the first wins.
    pub fn new(stations: Vec<Station>, trains: Vec<Train>) -> Self {
        let mut index = HashMap::with_capacity(stations.len());
        let mut unique = Vec::with_capacity(stations.len());
        for station in stations {
            if index.contains_key(&station.code) {
                tracing::warn!(code = %station.code, "duplicate station in directory");
                continue;
            }
            index.insert(station.code, unique.len());
            unique.push(station);
        }

        Self {
            stations: unique,
            index,
            trains,
        }
    }

    /// Convert provider responses into a snapshot.
    pub fn from_responses(stations: &StationsResponse, trains: &TrainsResponse) -> Self {
        Self::new(convert_stations(stations), convert_trains(trains))
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Look up a station by code.
    pub fn station(&self, code: StationCode) -> Option<&Station> {
        self.index.get(&code).map(|&i| &self.stations[i])
    }

    /// Stations matching `query` on name, city, code or state, in directory
    /// order, at most `limit` of them.
    ///
    /// A blank query matches nothing.
    pub fn search_stations(&self, query: &str, limit: usize) -> Vec<&Station> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        self.stations
            .iter()
            .filter(|s| s.matches(query))
            .take(limit)
            .collect()
    }

    /// Every train the station lists, seen from that station.
    ///
    /// Trains the station lists but which have no stop there are dropped.
    /// Order follows the train directory.
    pub fn station_trains(&self, code: StationCode) -> Vec<ScheduledTrain> {
        let Some(station) = self.station(code) else {
            return Vec::new();
        };

        self.trains
            .iter()
            .filter(|train| station.lists_train(&train.id))
            .filter_map(|train| ScheduledTrain::at_station(train, code))
            .collect()
    }

    /// The departure and arrival board for a station as of `now`.
    pub fn board(
        &self,
        code: StationCode,
        window: &BoardWindow,
        now: DateTime<Utc>,
    ) -> Option<StationBoard> {
        let station = self.station(code)?;
        let trains = self.station_trains(code);
        Some(StationBoard::build(station, &trains, window, now))
    }
}
