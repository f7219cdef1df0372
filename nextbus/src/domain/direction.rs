//! Cardinal direction type.

use std::fmt;

/// Error returned when a string is not one of the four cardinal directions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {input:?}")]
pub struct InvalidDirection {
    input: String,
}

impl InvalidDirection {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A direction of travel along a route.
///
/// Each direction maps to a fixed NexTrip direction code. The mapping is
/// static and never learned from the API.
///
/// # Examples
///
/// ```
/// use nextbus::domain::Direction;
///
/// let north = Direction::parse("north").unwrap();
/// assert_eq!(north.code(), 4);
///
/// // Matching is case-sensitive
/// assert!(Direction::parse("North").is_err());
/// assert!(Direction::parse("up").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    South,
    East,
    West,
    North,
}

impl Direction {
    /// All directions, in code order.
    pub const ALL: [Direction; 4] = [
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::North,
    ];

    /// Parse a lowercase cardinal direction word.
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s {
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            "north" => Ok(Direction::North),
            _ => Err(InvalidDirection {
                input: s.to_string(),
            }),
        }
    }

    /// Look up a direction by its NexTrip code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    /// The NexTrip direction code.
    pub fn code(self) -> u8 {
        match self {
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::North => 4,
        }
    }

    /// The lowercase word for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::North => "north",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Anything other than the four words is rejected
        #[test]
        fn unknown_words_rejected(s in "\\PC{0,12}") {
            prop_assume!(!["north", "south", "east", "west"].contains(&s.as_str()));
            prop_assert!(Direction::parse(&s).is_err());
        }

        /// parse then as_str returns the original word
        #[test]
        fn roundtrip(d in proptest::sample::select(Direction::ALL.to_vec())) {
            prop_assert_eq!(Direction::parse(d.as_str()).unwrap(), d);
        }
    }
}
