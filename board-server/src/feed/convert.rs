//! Conversion from feed DTOs to domain types.
//!
//! Records that can't be converted are logged and skipped; one bad train
//! never takes the whole board down, and one bad stop never takes its train
//! down.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    Station, StationCode, StationStop, TimeError, Timestamp, Train, TrainId, parse_timestamp,
};

use super::types::{
    StationDto, StationStopDto, StationsResponse, TrainDto, TrainNumber, TrainsResponse,
    directory_entries,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Record is not the expected JSON shape
    #[error("malformed record: {0}")]
    Malformed(String),

    /// Failed to parse a station code
    #[error("invalid station code: {0}")]
    InvalidStationCode(String),

    /// Train number is not a non-negative integer
    #[error("invalid train number: {0}")]
    InvalidTrainNumber(String),

    /// Failed to parse a timestamp
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert the station directory, skipping invalid stations.
pub fn convert_stations(stations: &StationsResponse) -> Vec<Station> {
    directory_entries(stations)
        .into_iter()
        .filter_map(|(key, record)| {
            match parse_record::<StationDto>(record).and_then(|dto| convert_station(&dto)) {
                Ok(station) => Some(station),
                Err(e) => {
                    tracing::warn!(key, error = %e, "skipping station");
                    None
                }
            }
        })
        .collect()
}

/// Convert a single station.
pub fn convert_station(dto: &StationDto) -> Result<Station, ConversionError> {
    let code = parse_code(&dto.code)?;
    Ok(Station {
        code,
        name: dto.name.clone(),
        city: dto.city.clone().unwrap_or_default(),
        state: dto.state.clone().unwrap_or_default(),
        trains: dto.trains.iter().map(TrainId::new).collect(),
    })
}

/// Flatten and convert the train directory, skipping invalid trains.
///
/// Order is the directory's enumeration order, then the order within each
/// entry.
pub fn convert_trains(trains: &TrainsResponse) -> Vec<Train> {
    directory_entries(trains)
        .into_iter()
        .flat_map(|(number, runs)| {
            let runs: &[Value] = match runs.as_array() {
                Some(runs) => runs,
                None => {
                    tracing::warn!(number, "skipping train number: expected a list of runs");
                    &[]
                }
            };
            runs.iter().map(move |run| (number, run))
        })
        .filter_map(|(number, run)| {
            match parse_record::<TrainDto>(run).and_then(|dto| convert_train(&dto)) {
                Ok(train) => Some(train),
                Err(e) => {
                    tracing::warn!(number, error = %e, "skipping train");
                    None
                }
            }
        })
        .collect()
}

/// Convert a single train run, skipping stops that can't be converted.
pub fn convert_train(dto: &TrainDto) -> Result<Train, ConversionError> {
    if dto.train_id.trim().is_empty() {
        return Err(ConversionError::MissingField("trainID"));
    }

    let number = match &dto.train_num {
        TrainNumber::Number(n) => *n,
        TrainNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| ConversionError::InvalidTrainNumber(s.clone()))?,
    };

    let stops = dto
        .stations
        .iter()
        .filter_map(|record| {
            match parse_record::<StationStopDto>(record).and_then(|stop| convert_stop(&stop)) {
                Ok(stop) => Some(stop),
                Err(e) => {
                    tracing::warn!(train_id = %dto.train_id, error = %e, "skipping stop");
                    None
                }
            }
        })
        .collect();

    Ok(Train {
        id: TrainId::new(dto.train_id.clone()),
        number,
        route_name: dto.route_name.clone(),
        origin_name: dto.orig_name.clone().unwrap_or_default(),
        destination_name: dto.dest_name.clone().unwrap_or_default(),
        stops,
    })
}

fn parse_record<'a, T: Deserialize<'a>>(record: &'a Value) -> Result<T, ConversionError> {
    T::deserialize(record).map_err(|e| ConversionError::Malformed(e.to_string()))
}

fn convert_stop(dto: &StationStopDto) -> Result<StationStop, ConversionError> {
    Ok(StationStop {
        code: parse_code(&dto.code)?,
        scheduled_arrival: parse_optional_time(dto.sch_arr.as_deref())?,
        scheduled_departure: parse_optional_time(dto.sch_dep.as_deref())?,
        status: dto.status.clone().unwrap_or_default(),
        arrival_comment: non_empty(dto.arr_cmnt.as_deref()),
        departure_comment: non_empty(dto.dep_cmnt.as_deref()),
    })
}

fn parse_code(code: &str) -> Result<StationCode, ConversionError> {
    StationCode::parse_normalized(code)
        .map_err(|_| ConversionError::InvalidStationCode(code.to_string()))
}

/// Absent and empty strings are both "no time".
fn parse_optional_time(s: Option<&str>) -> Result<Option<Timestamp>, ConversionError> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(parse_timestamp(s)?)),
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty()).map(str::to_string)
}
