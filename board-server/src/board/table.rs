//! Departure and arrival tables for one station.

use chrono::{DateTime, Utc};

use crate::domain::{BoardKind, ScheduledTrain, Station, format_board_time};

use super::status::StatusResolver;
use super::window::BoardWindow;

/// One row of a departure or arrival table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub train_id: String,
    /// Scheduled time in board format, e.g. `4:30p`.
    pub time: String,
    pub number: u32,
    pub route: String,
    /// Destination on departure boards, origin on arrival boards.
    pub counterpart: String,
    pub status: String,
}

impl BoardRow {
    /// Build the row for `train` on the `kind` board.
    ///
    /// Returns `None` if the train has no scheduled time for `kind`.
    pub fn from_train(
        train: &ScheduledTrain,
        kind: BoardKind,
        resolver: &StatusResolver,
    ) -> Option<Self> {
        let scheduled = train.scheduled(kind)?;
        Some(Self {
            train_id: train.train_id.to_string(),
            time: format_board_time(&scheduled),
            number: train.train_number,
            route: train.route_name.clone(),
            counterpart: train.counterpart(kind).to_string(),
            status: resolver.resolve(&train.status, train.comment(kind), scheduled),
        })
    }
}

/// Both tables for a station, as of one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationBoard {
    pub station_code: String,
    pub station_name: String,
    pub departures: Vec<BoardRow>,
    pub arrivals: Vec<BoardRow>,
}

impl StationBoard {
    /// Build the departure and arrival tables for `station` as of `now`.
    ///
    /// `trains` are the station's trains in feed order; each table is
    /// selected independently from them.
    pub fn build(
        station: &Station,
        trains: &[ScheduledTrain],
        window: &BoardWindow,
        now: DateTime<Utc>,
    ) -> Self {
        let resolver = StatusResolver::default();
        let rows = |kind: BoardKind| -> Vec<BoardRow> {
            window
                .select_at(trains, kind, now)
                .into_iter()
                .filter_map(|train| BoardRow::from_train(train, kind, &resolver))
                .collect()
        };

        Self {
            station_code: station.code.to_string(),
            station_name: station.name.clone(),
            departures: rows(BoardKind::Departure),
            arrivals: rows(BoardKind::Arrival),
        }
    }

    /// Whether neither table has any trains.
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty() && self.arrivals.is_empty()
    }
}
