//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::{BoardRow, StationBoard};
use crate::domain::Station;

/// Number of station matches shown when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Upper bound on requested station matches.
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Request to search stations.
#[derive(Debug, Default, Deserialize)]
pub struct StationSearchRequest {
    /// Free-text query matched against name, city, code and state
    #[serde(default)]
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl StationSearchRequest {
    /// The requested limit, defaulted and capped.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .min(MAX_SEARCH_LIMIT)
    }
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    pub code: String,
    pub name: String,
    pub city: String,
    pub state: String,
    /// "Name Station - City, State"
    pub label: String,
}

impl StationSearchResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            code: station.code.to_string(),
            name: station.name.clone(),
            city: station.city.clone(),
            state: station.state.clone(),
            label: station.label(),
        }
    }
}

/// A station's departure and arrival boards.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub station_code: String,
    pub station_name: String,
    pub departures: Vec<BoardRowResult>,
    pub arrivals: Vec<BoardRowResult>,
    /// When the feed was last refreshed, e.g. "4:30pm"
    pub last_updated: Option<String>,
    /// Whether the most recent feed refresh failed
    pub feed_error: bool,
}

impl BoardResponse {
    pub fn from_board(board: &StationBoard, last_updated: Option<String>, feed_error: bool) -> Self {
        Self {
            station_code: board.station_code.clone(),
            station_name: board.station_name.clone(),
            departures: board.departures.iter().map(BoardRowResult::from_row).collect(),
            arrivals: board.arrivals.iter().map(BoardRowResult::from_row).collect(),
            last_updated,
            feed_error,
        }
    }
}

/// One train on a board.
#[derive(Debug, Serialize)]
pub struct BoardRowResult {
    pub train_id: String,
    /// Scheduled time, e.g. "4:30p"
    pub time: String,
    pub number: u32,
    pub route: String,
    /// Destination (departures) or origin (arrivals)
    pub counterpart: String,
    pub status: String,
}

impl BoardRowResult {
    pub fn from_row(row: &BoardRow) -> Self {
        Self {
            train_id: row.train_id.clone(),
            time: row.time.clone(),
            number: row.number,
            route: row.route.clone(),
            counterpart: row.counterpart.clone(),
            status: row.status.clone(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
