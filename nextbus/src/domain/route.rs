//! Route types.

use std::fmt;

/// Error returned when parsing an invalid route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// A NexTrip route identifier (e.g. "901" for the METRO Blue Line).
///
/// Route ids are opaque: any non-empty string the API sends is accepted, and
/// the client percent-encodes it when building a request path.
///
/// # Examples
///
/// ```
/// use nextbus::domain::RouteId;
///
/// let blue = RouteId::parse("901").unwrap();
/// assert_eq!(blue.as_str(), "901");
///
/// assert!(RouteId::parse("A Line").is_ok());
/// assert!(RouteId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        if s.is_empty() {
            return Err(InvalidRouteId {
                reason: "must not be empty",
            });
        }

        Ok(RouteId(s.to_string()))
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transit route with its human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    /// Free-text name, e.g. "METRO Blue Line".
    pub description: String,
}

impl Route {
    pub fn new(id: RouteId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}
