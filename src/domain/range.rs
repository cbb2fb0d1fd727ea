use chrono::{DateTime, NaiveDate, TimeZone};
use std::fmt;

/// Which side of a range a resolved instant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Start,
    End,
}

impl Boundary {
    pub fn is_end(&self) -> bool {
        matches!(self, Boundary::End)
    }
}

/// An inclusive `[start, end]` pair of instants. `start <= end` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRange<Tz: TimeZone> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> ResolvedRange<Tz> {
    /// Returns `None` when `start` is after `end`
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }

    pub fn timestamps(&self) -> (i64, i64) {
        (self.start_timestamp(), self.end_timestamp())
    }

    pub fn contains<Other: TimeZone>(&self, instant: &DateTime<Other>) -> bool {
        *instant >= self.start && *instant <= self.end
    }

    /// Calendar dates touched by the range, in the range's own time zone
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start.date_naive();
        let end = self.end.date_naive();
        start.iter_days().take_while(move |date| *date <= end)
    }

    pub fn num_days(&self) -> i64 {
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }

    pub fn into_inner(self) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.start, self.end)
    }
}

impl<Tz: TimeZone> fmt::Display for ResolvedRange<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
