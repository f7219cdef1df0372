//! In-memory NexTrip stand-in for testing without network access.
//!
//! Serves fixed data as if it came from the API, records every request, and
//! can be told to fail on a chosen endpoint with a 503.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{Departure, Direction, Route, RouteId, Stop, StopId};
use crate::inquiry::TransitApi;

use super::client::Endpoint;
use super::error::TransitError;

/// Mock NexTrip API.
///
/// Lookups with no configured data return an empty list, which is what
/// NexTrip does for unknown routes and stops.
#[derive(Debug, Default)]
pub struct MockNexTrip {
    routes: Vec<Route>,
    directions: HashMap<RouteId, Vec<Direction>>,
    stops: HashMap<(RouteId, Direction), Vec<Stop>>,
    departures: HashMap<(RouteId, Direction, StopId), Vec<Departure>>,
    failing: Vec<Endpoint>,
    requests: Mutex<Vec<Endpoint>>,
}

impl MockNexTrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `Routes` response.
    pub fn with_routes(mut self, routes: Vec<Route>) -> Self {
        self.routes = routes;
        self
    }

    /// Set the `Directions/{route}` response.
    pub fn with_directions(mut self, route: RouteId, directions: Vec<Direction>) -> Self {
        self.directions.insert(route, directions);
        self
    }

    /// Set the `Stops/{route}/{direction}` response.
    pub fn with_stops(mut self, route: RouteId, direction: Direction, stops: Vec<Stop>) -> Self {
        self.stops.insert((route, direction), stops);
        self
    }

    /// Set the `{route}/{direction}/{stop}` response.
    pub fn with_departures(
        mut self,
        route: RouteId,
        direction: Direction,
        stop: StopId,
        departures: Vec<Departure>,
    ) -> Self {
        self.departures.insert((route, direction, stop), departures);
        self
    }

    /// Answer requests for `endpoint` with HTTP 503.
    pub fn failing_at(mut self, endpoint: Endpoint) -> Self {
        self.failing.push(endpoint);
        self
    }

    /// Requests made so far, in order.
    pub fn requests(&self) -> Vec<Endpoint> {
        self.lock_requests().clone()
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<Endpoint>> {
        // A panic while holding the lock cannot leave the log inconsistent.
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, endpoint: Endpoint) -> Result<(), TransitError> {
        let fail = self.failing.contains(&endpoint);
        let path = endpoint.path();
        self.lock_requests().push(endpoint);

        if fail {
            return Err(TransitError::Api {
                status: 503,
                message: format!("mock failure for {path}"),
            });
        }
        Ok(())
    }
}

impl TransitApi for MockNexTrip {
    async fn routes(&self) -> Result<Vec<Route>, TransitError> {
        self.record(Endpoint::Routes)?;
        Ok(self.routes.clone())
    }

    async fn directions(&self, route: &RouteId) -> Result<Vec<Direction>, TransitError> {
        self.record(Endpoint::Directions(route.clone()))?;
        Ok(self.directions.get(route).cloned().unwrap_or_default())
    }

    async fn stops(&self, route: &RouteId, direction: Direction) -> Result<Vec<Stop>, TransitError> {
        self.record(Endpoint::Stops(route.clone(), direction))?;
        Ok(self
            .stops
            .get(&(route.clone(), direction))
            .cloned()
            .unwrap_or_default())
    }

    async fn departures(
        &self,
        route: &RouteId,
        direction: Direction,
        stop: &StopId,
    ) -> Result<Vec<Departure>, TransitError> {
        self.record(Endpoint::Departures(route.clone(), direction, stop.clone()))?;
        Ok(self
            .departures
            .get(&(route.clone(), direction, stop.clone()))
            .cloned()
            .unwrap_or_default())
    }
}
