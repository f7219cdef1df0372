//! Domain types for the NexTrip inquiry client.
//!
//! These types represent validated transit data. Identifiers enforce their
//! invariants at construction time, so code that receives them can put them
//! straight into a request path.

mod departure;
mod direction;
mod route;
mod stop;

pub use departure::Departure;
pub use direction::{Direction, InvalidDirection};
pub use route::{InvalidRouteId, Route, RouteId};
pub use stop::{InvalidStopId, Stop, StopId};
