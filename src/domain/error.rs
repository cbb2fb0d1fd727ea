use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateErrorKind {
    /// Not a known period and not a parseable date
    Unparsable,
    /// The computed date or timestamp falls outside the representable range
    OutOfRange,
    /// The start boundary resolved to an instant after the end boundary
    InvertedRange,
}

impl fmt::Display for DateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateErrorKind::Unparsable => write!(f, "Improper date provided"),
            DateErrorKind::OutOfRange => write!(f, "Date out of range"),
            DateErrorKind::InvertedRange => write!(f, "Start date is after end date"),
        }
    }
}

/// Raised when a period descriptor cannot be turned into a timestamp.
///
/// Always carries the raw descriptor text so the caller can report it back
/// to the user unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {input}")]
pub struct InvalidDateError {
    input: String,
    kind: DateErrorKind,
}

impl InvalidDateError {
    pub fn new(input: impl Into<String>, kind: DateErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    pub fn unparsable(input: impl Into<String>) -> Self {
        Self::new(input, DateErrorKind::Unparsable)
    }

    pub fn out_of_range(input: impl Into<String>) -> Self {
        Self::new(input, DateErrorKind::OutOfRange)
    }

    pub fn inverted(start: impl fmt::Display, end: impl fmt::Display) -> Self {
        Self::new(format!("{start}..{end}"), DateErrorKind::InvertedRange)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> DateErrorKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Week start must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidWeekStart(i64),
}
