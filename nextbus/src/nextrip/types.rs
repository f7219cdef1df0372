//! NexTrip API response DTOs.
//!
//! These types map directly to the NexTrip JSON responses, which use
//! PascalCase field names. Fields we never read are still declared where
//! they help document the wire format; unknown fields are ignored.

use std::fmt;

use serde::Deserialize;

/// An identifier that NexTrip sends as either a JSON string or a number.
///
/// Route ids arrive as strings (`"901"`) from `Routes` but direction codes
/// have been seen both ways, so we accept either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Text(s) => f.write_str(s),
            WireId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One entry of the `Routes` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteDto {
    /// Route id, e.g. "901".
    pub route: WireId,

    /// Human-readable route name, e.g. "METRO Blue Line".
    pub description: String,

    /// Operating agency.
    #[serde(rename = "ProviderID")]
    pub provider_id: Option<WireId>,
}

/// One entry of the `Directions/{route}` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectionDto {
    /// Label such as "NORTHBOUND".
    pub text: String,

    /// Direction code (1-4).
    pub value: WireId,
}

/// One entry of the `Stops/{route}/{direction}` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopDto {
    /// Stop description, typically an intersection.
    pub text: String,

    /// Stop code, e.g. "FRHI".
    pub value: String,
}

/// One entry of the `{route}/{direction}/{stop}` response.
///
/// The API sends many more fields (headsign, gate, vehicle position); only
/// the display text is shown, and serde ignores the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartureDto {
    /// Display text: "Due", "5 Min" or a clock time like "4:52".
    pub departure_text: String,
}
