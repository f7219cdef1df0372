//! NexTrip real-time departure API client.
//!
//! This module provides an HTTP client for the Metro Transit NexTrip API,
//! which answers four questions in a chain:
//! - which routes exist (`Routes`)
//! - which directions a route runs (`Directions/{route}`)
//! - which stops a route serves in one direction (`Stops/{route}/{direction}`)
//! - when the next vehicles leave a stop (`{route}/{direction}/{stop}`)
//!
//! Every request asks for JSON with `?format=json`; without it the service
//! answers in XML.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{Endpoint, NexTripClient, NexTripConfig};
pub use convert::{
    ConversionError, convert_departures, convert_directions, convert_routes, convert_stops,
};
pub use error::TransitError;
pub use mock::MockNexTrip;
pub use types::{DepartureDto, DirectionDto, RouteDto, StopDto, WireId};
