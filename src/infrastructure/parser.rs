use crate::domain::{Boundary, local_instant};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_english::{Dialect, parse_date_string};
use log::trace;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Result of parsing a date string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedDate<Tz: TimeZone> {
    /// The input named a point in time
    Instant(DateTime<Tz>),
    /// The input named a whole calendar day, with no clock time
    Day(NaiveDate),
}

impl<Tz: TimeZone> ParsedDate<Tz> {
    /// Pin to an instant; whole days start at 00:00:00 and end at 23:59:59
    pub fn at_boundary(self, tz: &Tz, boundary: Boundary) -> Option<DateTime<Tz>> {
        match self {
            ParsedDate::Instant(instant) => Some(instant),
            ParsedDate::Day(date) => {
                let naive = match boundary {
                    Boundary::Start => date.and_time(NaiveTime::MIN),
                    Boundary::End => date.and_hms_opt(23, 59, 59)?,
                };
                local_instant(tz, naive)
            }
        }
    }
}

/// Parses free-form date strings relative to a reference instant.
///
/// Tries, in order: `@<unix seconds>`, RFC 3339, RFC 2822, ISO-like
/// date-times and plain dates in the reference zone, then natural
/// language ("tomorrow", "next friday") in the US dialect. Bare digit
/// strings are rejected.
pub struct DateParser;

impl DateParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse<Tz>(&self, input: &str, now: &DateTime<Tz>) -> Option<ParsedDate<Tz>>
    where
        Tz: TimeZone,
        Tz::Offset: Copy,
    {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let tz = now.timezone();

        if let Some(seconds) = trimmed.strip_prefix('@') {
            trace!("parsing '{}' as unix seconds", trimmed);
            let seconds: i64 = seconds.parse().ok()?;
            return tz.timestamp_opt(seconds, 0).single().map(ParsedDate::Instant);
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            trace!("parsed '{}' as RFC 3339", trimmed);
            return Some(ParsedDate::Instant(instant.with_timezone(&tz)));
        }

        if let Ok(instant) = DateTime::parse_from_rfc2822(trimmed) {
            trace!("parsed '{}' as RFC 2822", trimmed);
            return Some(ParsedDate::Instant(instant.with_timezone(&tz)));
        }

        for format in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                trace!("parsed '{}' with '{}'", trimmed, format);
                return local_instant(&tz, naive).map(ParsedDate::Instant);
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                trace!("parsed '{}' with '{}'", trimmed, format);
                return Some(ParsedDate::Day(date));
            }
        }

        // chrono-english reads "12" as a year
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            trace!("rejecting bare number '{}'", trimmed);
            return None;
        }

        let normalized = trimmed.to_lowercase();
        match parse_date_string(&normalized, now.clone(), Dialect::Us) {
            Ok(instant) => {
                trace!("parsed '{}' as natural language", trimmed);
                if has_explicit_time(&normalized) {
                    Some(ParsedDate::Instant(instant))
                } else {
                    Some(ParsedDate::Day(instant.date_naive()))
                }
            }
            Err(err) => {
                trace!("could not parse '{}': {}", trimmed, err);
                None
            }
        }
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

fn has_explicit_time(input: &str) -> bool {
    input.contains(':')
        || input.split_whitespace().any(|word| {
            matches!(word, "now" | "noon" | "midnight")
                || (word.starts_with(|c: char| c.is_ascii_digit())
                    && (word.ends_with("am") || word.ends_with("pm")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::fixtures::{fixed_now, utc};
    use chrono::{FixedOffset, Utc};

    fn day(y: i32, m: u32, d: u32) -> ParsedDate<Utc> {
        ParsedDate::Day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn unix_seconds_with_at_prefix() {
        let now = fixed_now(2024, 2, 15);
        let parsed = DateParser::new().parse("@1700000000", &now).unwrap();
        assert_eq!(parsed, ParsedDate::Instant(utc(2023, 11, 14, 22, 13, 20)));
    }

    #[test]
    fn iso_dates_are_whole_days() {
        let now = fixed_now(2024, 2, 15);
        assert_eq!(DateParser::new().parse("2013-08-03", &now), Some(day(2013, 8, 3)));
    }

    #[test]
    fn written_month_names() {
        let now = fixed_now(2024, 2, 15);
        let parser = DateParser::new();
        assert_eq!(parser.parse("August 3, 2013", &now), Some(day(2013, 8, 3)));
        assert_eq!(parser.parse("3 August 2013", &now), Some(day(2013, 8, 3)));
        assert_eq!(parser.parse("08/03/2013", &now), Some(day(2013, 8, 3)));
    }

    #[test]
    fn date_times_keep_their_clock_time() {
        let now = fixed_now(2024, 2, 15);
        assert_eq!(
            DateParser::new().parse("2024-02-10 13:45:10", &now),
            Some(ParsedDate::Instant(utc(2024, 2, 10, 13, 45, 10)))
        );
    }

    #[test]
    fn rfc3339_is_converted_into_the_reference_zone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap();
        let parsed = DateParser::new()
            .parse("2024-02-10T12:00:00Z", &now)
            .unwrap()
            .at_boundary(&tz, Boundary::End)
            .unwrap();

        assert_eq!(parsed.offset(), &tz);
        assert_eq!(parsed.with_timezone(&Utc), utc(2024, 2, 10, 12, 0, 0));
    }

    #[test]
    fn natural_language_is_relative_to_now() {
        let now = fixed_now(2024, 2, 28);
        assert_eq!(DateParser::new().parse("tomorrow", &now), Some(day(2024, 2, 29)));
    }

    #[test]
    fn whole_days_snap_to_the_boundary() {
        let parsed = day(2024, 1, 15);
        assert_eq!(
            parsed.clone().at_boundary(&Utc, Boundary::Start),
            Some(utc(2024, 1, 15, 0, 0, 0))
        );
        assert_eq!(
            parsed.at_boundary(&Utc, Boundary::End),
            Some(utc(2024, 1, 15, 23, 59, 59))
        );

        let instant = ParsedDate::Instant(utc(2024, 1, 15, 8, 0, 0));
        assert_eq!(
            instant.at_boundary(&Utc, Boundary::End),
            Some(utc(2024, 1, 15, 8, 0, 0))
        );
    }

    #[test]
    fn explicit_time_detection() {
        assert!(has_explicit_time("next friday 8pm"));
        assert!(has_explicit_time("tomorrow 09:30"));
        assert!(has_explicit_time("noon"));
        assert!(!has_explicit_time("next friday"));
        assert!(!has_explicit_time("tomorrow"));
    }

    #[test]
    fn garbage_is_rejected() {
        let now = fixed_now(2024, 2, 15);
        let parser = DateParser::new();
        assert_eq!(parser.parse("not-a-date", &now), None);
        assert_eq!(parser.parse("   ", &now), None);
        assert_eq!(parser.parse("@soon", &now), None);
    }

    #[test]
    fn bare_numbers_are_rejected() {
        let now = fixed_now(2024, 2, 15);
        let parser = DateParser::new();
        assert_eq!(parser.parse("12", &now), None);
        assert_eq!(parser.parse("1700000000", &now), None);
    }
}
