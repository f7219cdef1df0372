//! Resolution of user-typed fragments into NexTrip identifiers.
//!
//! Users rarely know the official description of a route or stop, so we
//! accept any fragment of it: "Franklin" finds "Franklin Ave & Chicago Ave".
//! Matching is an exact, case-sensitive substring test, and the first
//! candidate in API order wins. An ambiguous fragment therefore resolves to
//! whichever candidate the API lists first; there is no disambiguation.

use crate::domain::{Direction, Route, RouteId, Stop, StopId};

/// Error from resolving a fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Could not recognize direction \"{0}\". Please use north, south, east, or west.")]
    UnknownDirection(String),

    #[error("Could not find route name \"{0}\".")]
    UnknownRoute(String),

    #[error("Could not find stop name \"{0}\".")]
    UnknownStop(String),
}

/// Find the first item whose label contains `needle`.
pub fn find_first_containing<'a, T>(
    needle: &str,
    items: &'a [T],
    label: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    items.iter().find(|&item| label(item).contains(needle))
}

/// Resolve a cardinal direction word to its direction.
///
/// Never touches the network.
pub fn resolve_direction_code(input: &str) -> Result<Direction, ResolveError> {
    Direction::parse(input).map_err(|e| ResolveError::UnknownDirection(e.input().to_string()))
}

/// Resolve a route description fragment to the first matching route's id.
pub fn resolve_route_id(input: &str, routes: &[Route]) -> Result<RouteId, ResolveError> {
    find_first_containing(input, routes, |r| r.description.as_str())
        .map(|r| r.id.clone())
        .ok_or_else(|| ResolveError::UnknownRoute(input.to_string()))
}

/// Resolve a stop description fragment to the first matching stop's id.
pub fn resolve_stop_id(input: &str, stops: &[Stop]) -> Result<StopId, ResolveError> {
    find_first_containing(input, stops, |s| s.description.as_str())
        .map(|s| s.id.clone())
        .ok_or_else(|| ResolveError::UnknownStop(input.to_string()))
}
