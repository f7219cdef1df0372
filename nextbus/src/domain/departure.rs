//! Departure type.

/// A scheduled or estimated vehicle departure from a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Display text, either relative ("10 Min", "Due") or a clock time ("4:52").
    pub text: String,
}

impl Departure {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
