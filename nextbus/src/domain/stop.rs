//! Stop types.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A NexTrip stop code, usually 4 uppercase characters (e.g. "FRHI").
///
/// Codes are opaque: any non-empty string is accepted as sent, and the
/// client percent-encodes it in the departures request path.
///
/// # Examples
///
/// ```
/// use nextbus::domain::StopId;
///
/// let stop = StopId::parse("FRHI").unwrap();
/// assert_eq!(stop.as_str(), "FRHI");
///
/// assert!(StopId::parse("FR-5").is_ok());
/// assert!(StopId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A boarding location along a route in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub id: StopId,
    /// Free-text label, typically a street intersection.
    pub description: String,
}

impl Stop {
    pub fn new(id: StopId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}
