//! Command-line surface.
//!
//! Positional arguments fill the inquiry left to right, so the number given
//! picks the question: none lists routes, two list stops, three or four ask
//! for departures.

use clap::Parser;

use crate::inquiry::Inquiry;
use crate::nextrip::NexTripConfig;

/// Welcome to NextBus: real-time departures from the Metro Transit NexTrip API.
#[derive(Debug, Parser)]
#[command(name = "nextbus", version, about, long_about = None)]
pub struct Cli {
    /// Route name, or any part of it (e.g. "Blue Line"). Omit to list all routes.
    #[arg(value_name = "BUS ROUTE")]
    pub route: Option<String>,

    /// Direction of travel: north, south, east or west
    #[arg(value_name = "DIRECTION")]
    pub direction: Option<String>,

    /// Stop name, or any part of it (e.g. "Franklin"). Omit to list stops.
    #[arg(value_name = "BUS STOP NAME")]
    pub stop: Option<String>,

    /// Number of upcoming departures to show
    #[arg(value_name = "NUMBER OF UPCOMING DEPARTURES")]
    pub count: Option<usize>,

    /// NexTrip API root
    #[arg(long, env = "NEXTRIP_BASE_URL")]
    pub base_url: Option<String>,

    /// Log each request to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The inquiry the positional arguments describe.
    pub fn inquiry(&self) -> Inquiry {
        Inquiry {
            route: self.route.clone(),
            direction: self.direction.clone(),
            stop: self.stop.clone(),
            departures: self.count,
        }
    }

    /// Client configuration, honoring `--base-url`.
    pub fn nextrip_config(&self) -> NexTripConfig {
        match &self.base_url {
            Some(url) => NexTripConfig::new().with_base_url(url),
            None => NexTripConfig::new(),
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "nextbus=debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inquiry::InquiryMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nextbus").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments_lists_routes() {
        let cli = parse(&[]);
        assert_eq!(cli.inquiry(), Inquiry::all_routes());
        assert_eq!(cli.inquiry().mode().unwrap(), InquiryMode::ListRoutes);
    }

    #[test]
    fn one_argument_needs_direction() {
        let cli = parse(&["Blue Line"]);
        assert!(cli.inquiry().mode().is_err());
    }

    #[test]
    fn two_arguments_list_stops() {
        let cli = parse(&["Blue Line", "south"]);
        assert_eq!(cli.inquiry(), Inquiry::stops("Blue Line", "south"));
    }

    #[test]
    fn three_and_four_arguments_ask_for_departures() {
        let cli = parse(&["Blue Line", "south", "Franklin"]);
        assert_eq!(
            cli.inquiry(),
            Inquiry::departures("Blue Line", "south", "Franklin", None)
        );

        let cli = parse(&["Blue Line", "south", "Franklin", "3"]);
        assert_eq!(cli.inquiry().departures, Some(3));
    }

    #[test]
    fn count_must_be_a_number() {
        let result =
            Cli::try_parse_from(["nextbus", "Blue Line", "south", "Franklin", "soon"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["nextbus", "Blue Line", "south", "Franklin", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn help_is_not_an_inquiry() {
        let err = Cli::try_parse_from(["nextbus", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn base_url_flag_overrides_default() {
        let cli = parse(&["--base-url", "http://localhost:9000/NexTrip"]);
        assert_eq!(cli.nextrip_config().base_url, "http://localhost:9000/NexTrip");
    }

    #[test]
    fn verbose_raises_log_level() {
        assert_eq!(parse(&["-v"]).log_filter(), "nextbus=debug");
    }
}
