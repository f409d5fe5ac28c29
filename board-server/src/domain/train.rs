//! Trains, their station stops, and the per-station view the boards use.

use std::fmt;

use super::{StationCode, Timestamp};

/// Opaque provider identifier for one run of a train (e.g. `"5-17"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId(String);

impl TrainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the board a train is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardKind {
    Departure,
    Arrival,
}

impl BoardKind {
    /// Board heading: "Departures" / "Arrivals".
    pub fn title(self) -> &'static str {
        match self {
            BoardKind::Departure => "Departures",
            BoardKind::Arrival => "Arrivals",
        }
    }

    /// Column heading for the far end of the journey.
    pub fn counterpart_label(self) -> &'static str {
        match self {
            BoardKind::Departure => "To",
            BoardKind::Arrival => "From",
        }
    }
}

/// One train's scheduled call at one station, as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStop {
    pub code: StationCode,
    pub scheduled_arrival: Option<Timestamp>,
    pub scheduled_departure: Option<Timestamp>,
    /// Provider status code ("Enroute", "Station", "Departed", ...).
    pub status: String,
    pub arrival_comment: Option<String>,
    pub departure_comment: Option<String>,
}

/// A train and all of its stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub id: TrainId,
    pub number: u32,
    pub route_name: String,
    pub origin_name: String,
    pub destination_name: String,
    pub stops: Vec<StationStop>,
}

impl Train {
    /// The stop this train makes at `code`, if any.
    pub fn stop_at(&self, code: StationCode) -> Option<&StationStop> {
        self.stops.iter().find(|s| s.code == code)
    }
}

/// A train seen from one station: the rows departure and arrival boards
/// are built from.
///
/// Scheduled times are the original timetable and are never adjusted;
/// delays are applied only when a status is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTrain {
    pub train_id: TrainId,
    pub train_number: u32,
    pub route_name: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_departure: Option<Timestamp>,
    pub scheduled_arrival: Option<Timestamp>,
    pub status: String,
    pub departure_comment: Option<String>,
    pub arrival_comment: Option<String>,
}

impl ScheduledTrain {
    /// Project `train` onto its stop at `code`.
    ///
    /// Returns `None` if the train does not stop there.
    pub fn at_station(train: &Train, code: StationCode) -> Option<Self> {
        let stop = train.stop_at(code)?;
        Some(Self {
            train_id: train.id.clone(),
            train_number: train.number,
            route_name: train.route_name.clone(),
            origin: train.origin_name.clone(),
            destination: train.destination_name.clone(),
            scheduled_departure: stop.scheduled_departure,
            scheduled_arrival: stop.scheduled_arrival,
            status: stop.status.clone(),
            departure_comment: stop.departure_comment.clone(),
            arrival_comment: stop.arrival_comment.clone(),
        })
    }

    /// The scheduled time that matters for this board.
    pub fn scheduled(&self, kind: BoardKind) -> Option<Timestamp> {
        match kind {
            BoardKind::Departure => self.scheduled_departure,
            BoardKind::Arrival => self.scheduled_arrival,
        }
    }

    /// The provider's comment for this board, or `""` if there is none.
    pub fn comment(&self, kind: BoardKind) -> &str {
        let comment = match kind {
            BoardKind::Departure => &self.departure_comment,
            BoardKind::Arrival => &self.arrival_comment,
        };
        comment.as_deref().unwrap_or("")
    }

    /// Where the train is going (departures) or coming from (arrivals).
    pub fn counterpart(&self, kind: BoardKind) -> &str {
        match kind {
            BoardKind::Departure => &self.destination,
            BoardKind::Arrival => &self.origin,
        }
    }
}
