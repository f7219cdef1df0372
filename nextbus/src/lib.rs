//! Command-line client for the Metro Transit NexTrip API.
//!
//! Answers "when does the next bus leave?" from whatever fragments of a
//! route name, direction and stop name the user can remember.

pub mod cli;
pub mod domain;
pub mod inquiry;
pub mod nextrip;
pub mod resolve;
