//! Conversion from NexTrip DTOs to domain types.
//!
//! Lists keep the order the API sent them in. Ids are opaque and kept
//! verbatim; only entries with an empty id or an unknown direction code are
//! logged and skipped rather than failing the whole response.

use tracing::warn;

use crate::domain::{Departure, Direction, Route, RouteId, Stop, StopId};

use super::types::{DepartureDto, DirectionDto, RouteDto, StopDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid route id: {0:?}")]
    InvalidRouteId(String),

    #[error("invalid stop id: {0:?}")]
    InvalidStopId(String),

    #[error("unknown direction code: {0:?}")]
    UnknownDirectionCode(String),
}

/// Convert a `Routes` response.
pub fn convert_routes(dtos: Vec<RouteDto>) -> Vec<Route> {
    keep_valid(dtos, convert_route, "route")
}

/// Convert a `Directions/{route}` response.
pub fn convert_directions(dtos: Vec<DirectionDto>) -> Vec<Direction> {
    keep_valid(dtos, convert_direction, "direction")
}

/// Convert a `Stops/{route}/{direction}` response.
pub fn convert_stops(dtos: Vec<StopDto>) -> Vec<Stop> {
    keep_valid(dtos, convert_stop, "stop")
}

/// Convert a departures response.
pub fn convert_departures(dtos: Vec<DepartureDto>) -> Vec<Departure> {
    dtos.into_iter().map(convert_departure).collect()
}

fn convert_route(dto: RouteDto) -> Result<Route, ConversionError> {
    let raw = dto.route.to_string();
    let id = RouteId::parse(&raw).map_err(|_| ConversionError::InvalidRouteId(raw.clone()))?;
    Ok(Route::new(id, dto.description))
}

fn convert_direction(dto: DirectionDto) -> Result<Direction, ConversionError> {
    let raw = dto.value.to_string();
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(Direction::from_code)
        .ok_or(ConversionError::UnknownDirectionCode(raw))
}

fn convert_stop(dto: StopDto) -> Result<Stop, ConversionError> {
    let id =
        StopId::parse(&dto.value).map_err(|_| ConversionError::InvalidStopId(dto.value.clone()))?;
    Ok(Stop::new(id, dto.text))
}

fn convert_departure(dto: DepartureDto) -> Departure {
    Departure::new(dto.departure_text)
}

fn keep_valid<D, T>(
    dtos: Vec<D>,
    convert: impl Fn(D) -> Result<T, ConversionError>,
    kind: &'static str,
) -> Vec<T> {
    dtos.into_iter()
        .filter_map(|dto| match convert(dto) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(kind, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}
