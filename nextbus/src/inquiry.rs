//! Inquiry orchestration.
//!
//! An inquiry is whatever subset of (route, direction, stop, count) the user
//! typed. The fields present pick one of four modes, from "list every route"
//! down to "show the next N departures from this stop". Each mode resolves
//! the fragments it needs into NexTrip ids, issuing its fetches one after
//! another, and assembles a printable [`Answer`].

use std::fmt;

use tracing::debug;

use crate::domain::{Departure, Direction, Route, RouteId, Stop, StopId};
use crate::nextrip::TransitError;
use crate::resolve::{ResolveError, resolve_direction_code, resolve_route_id, resolve_stop_id};

/// Trait for reaching the transit API.
///
/// This abstraction allows the orchestrator to be tested with mock data.
pub trait TransitApi {
    /// All routes, in API order.
    fn routes(&self) -> impl Future<Output = Result<Vec<Route>, TransitError>>;

    /// Directions the route runs in.
    fn directions(
        &self,
        route: &RouteId,
    ) -> impl Future<Output = Result<Vec<Direction>, TransitError>>;

    /// Stops served by the route in one direction, in API order.
    fn stops(
        &self,
        route: &RouteId,
        direction: Direction,
    ) -> impl Future<Output = Result<Vec<Stop>, TransitError>>;

    /// Upcoming departures from the stop, soonest first.
    fn departures(
        &self,
        route: &RouteId,
        direction: Direction,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<Departure>, TransitError>>;
}

/// Error from answering an inquiry. All are terminal.
#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error(
        "Sorry, we need a cardinal direction (north/south, east/west) to show you stops for route {route}."
    )]
    InsufficientArguments { route: String },

    #[error(transparent)]
    UnknownDirection(ResolveError),

    #[error("{0} Run nextbus with no arguments to list all routes.")]
    UnknownRoute(ResolveError),

    #[error("{error} Run nextbus \"{route}\" {direction} to list its stops.")]
    UnknownStop {
        error: ResolveError,
        route: String,
        direction: Direction,
    },

    #[error("Route \"{route}\" does not run {direction}. Try {}.", join_directions(.available))]
    DirectionNotServed {
        route: String,
        direction: Direction,
        available: Vec<Direction>,
    },

    #[error("Transit API request failed: {0}")]
    TransportFailure(#[from] TransitError),
}

fn join_directions(directions: &[Direction]) -> String {
    directions
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}

/// What the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inquiry {
    /// Fragment of a route description.
    pub route: Option<String>,
    /// Cardinal direction word.
    pub direction: Option<String>,
    /// Fragment of a stop description.
    pub stop: Option<String>,
    /// How many departures to show. Absent or 0 means 1.
    pub departures: Option<usize>,
}

/// Which question an inquiry asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryMode<'a> {
    ListRoutes,
    ListStops {
        route: &'a str,
        direction: &'a str,
    },
    NextDeparture {
        route: &'a str,
        direction: &'a str,
        stop: &'a str,
    },
    NDepartures {
        route: &'a str,
        direction: &'a str,
        stop: &'a str,
        count: usize,
    },
}

impl Inquiry {
    /// List every route.
    pub fn all_routes() -> Self {
        Self::default()
    }

    /// List the stops of a route in one direction.
    pub fn stops(route: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            route: Some(route.into()),
            direction: Some(direction.into()),
            ..Self::default()
        }
    }

    /// Next departure(s) from a stop.
    pub fn departures(
        route: impl Into<String>,
        direction: impl Into<String>,
        stop: impl Into<String>,
        count: Option<usize>,
    ) -> Self {
        Self {
            route: Some(route.into()),
            direction: Some(direction.into()),
            stop: Some(stop.into()),
            departures: count,
        }
    }

    /// Decide the mode from which fields are present.
    pub fn mode(&self) -> Result<InquiryMode<'_>, InquiryError> {
        let Some(route) = self.route.as_deref() else {
            return Ok(InquiryMode::ListRoutes);
        };

        let Some(direction) = self.direction.as_deref() else {
            return Err(InquiryError::InsufficientArguments {
                route: route.to_string(),
            });
        };

        let Some(stop) = self.stop.as_deref() else {
            return Ok(InquiryMode::ListStops { route, direction });
        };

        Ok(match self.departures {
            None | Some(0) | Some(1) => InquiryMode::NextDeparture {
                route,
                direction,
                stop,
            },
            Some(count) => InquiryMode::NDepartures {
                route,
                direction,
                stop,
                count,
            },
        })
    }
}

/// The assembled reply to an inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// What is being listed, e.g. "Available routes".
    pub heading: String,
    /// One entry per line.
    pub lines: Vec<String>,
}

impl Answer {
    /// The entries, newline-joined.
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\n\n", self.heading)?;
        if self.lines.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&self.body())
        }
    }
}

/// Answers inquiries against a transit API.
pub struct Orchestrator<'a, A> {
    api: &'a A,
}

impl<'a, A: TransitApi> Orchestrator<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Answer an inquiry.
    ///
    /// Fetches run strictly in sequence; the first failure ends the inquiry.
    pub async fn answer(&self, inquiry: &Inquiry) -> Result<Answer, InquiryError> {
        let mode = inquiry.mode()?;
        debug!(?mode, "answering inquiry");

        match mode {
            InquiryMode::ListRoutes => self.list_routes().await,
            InquiryMode::ListStops { route, direction } => {
                self.list_stops(route, direction).await
            }
            InquiryMode::NextDeparture {
                route,
                direction,
                stop,
            } => self.next_departures(route, direction, stop, 1).await,
            InquiryMode::NDepartures {
                route,
                direction,
                stop,
                count,
            } => self.next_departures(route, direction, stop, count).await,
        }
    }

    async fn list_routes(&self) -> Result<Answer, InquiryError> {
        let routes = self.api.routes().await?;

        Ok(Answer {
            heading: "Available routes".to_string(),
            lines: routes.into_iter().map(|r| r.description).collect(),
        })
    }

    async fn list_stops(&self, route: &str, direction: &str) -> Result<Answer, InquiryError> {
        let dir = resolve_direction_code(direction).map_err(InquiryError::UnknownDirection)?;
        let route_id = self.resolve_route(route).await?;
        let stops = self.stops_for(route, &route_id, dir).await?;

        Ok(Answer {
            heading: format!("Available stops for route {route} going {direction}"),
            lines: stops.into_iter().map(|s| s.description).collect(),
        })
    }

    async fn next_departures(
        &self,
        route: &str,
        direction: &str,
        stop: &str,
        count: usize,
    ) -> Result<Answer, InquiryError> {
        let dir = resolve_direction_code(direction).map_err(InquiryError::UnknownDirection)?;
        let route_id = self.resolve_route(route).await?;
        let stops = self.stops_for(route, &route_id, dir).await?;
        let stop_id = resolve_stop_id(stop, &stops).map_err(|error| InquiryError::UnknownStop {
            error,
            route: route.to_string(),
            direction: dir,
        })?;
        debug!(%route_id, %dir, %stop_id, "resolved inquiry");

        let departures = self.api.departures(&route_id, dir, &stop_id).await?;

        Ok(Answer {
            heading: format!("Next departure(s) for {route} at stop {stop}"),
            lines: departures
                .into_iter()
                .take(count.max(1))
                .map(|d| d.text)
                .collect(),
        })
    }

    /// Fetch the route list once and resolve the fragment against it.
    async fn resolve_route(&self, route: &str) -> Result<RouteId, InquiryError> {
        let routes = self.api.routes().await?;
        resolve_route_id(route, &routes).map_err(InquiryError::UnknownRoute)
    }

    /// Fetch stops, probing the route's directions when none come back.
    ///
    /// NexTrip answers an empty list both for a direction the route does not
    /// run and for a route with no service at all; the directions probe tells
    /// the two apart.
    async fn stops_for(
        &self,
        route: &str,
        route_id: &RouteId,
        direction: Direction,
    ) -> Result<Vec<Stop>, InquiryError> {
        let stops = self.api.stops(route_id, direction).await?;
        if !stops.is_empty() {
            return Ok(stops);
        }

        let available = self.api.directions(route_id).await?;
        debug!(%route_id, ?available, "no stops, probed directions");

        if available.is_empty() {
            return Err(InquiryError::UnknownRoute(ResolveError::UnknownRoute(
                route.to_string(),
            )));
        }
        if !available.contains(&direction) {
            return Err(InquiryError::DirectionNotServed {
                route: route.to_string(),
                direction,
                available,
            });
        }
        Ok(stops)
    }
}
